//! DEF Netlist to Hypergraph Converter
//!
//! This library parses the COMPONENTS, PINS and NETS sections of a DEF file
//! into a hypergraph representation consumable by placement algorithms, writes
//! the graph as two plain-ASCII artifacts (`hypergraph.txt`, `vertex_info.txt`),
//! and injects computed placement coordinates back into a DEF file.

pub mod def;
pub mod export;
pub mod place;

// Re-export commonly used types
pub use def::def_parser::{parse_def_graph, ParseOptions};
pub use def::parser::ParseError;
pub use def::reader::DefReader;
pub use def::{DefGraph, FixedVertex, NameIndex, Net, VertexId, VertexKind};
pub use export::{write_hypergraph, write_vertex_info};
pub use place::{
    read_positions_csv, write_placed_def, write_placed_def_untagged, CellPosition, InjectError,
};
