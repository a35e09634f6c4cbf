// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Plain-ASCII artifact writers for the extracted hypergraph.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::def::{DefGraph, VertexId};

/// Write the hypergraph summary: vertex/cell/IO totals and one line of
/// space-separated vertex ids per net, in resolution order. Nets with no
/// connections produce no line.
///
/// The header's `driver_id` wording is historical: no driver detection is
/// performed and the first id is simply the first connection token.
pub fn write_hypergraph<P: AsRef<Path>>(graph: &DefGraph, path: P) -> io::Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "Number of vertices: {}", graph.vertex_count())?;
    writeln!(out, "  Number of macros + std_cells: {}", graph.cell_count)?;
    writeln!(out, "  Number of IOs: {}", graph.io_count)?;
    writeln!(out, "hyperedges: driver_id load_id1 load_id2 ...")?;

    for net in &graph.nets {
        if net.vertices.is_empty() {
            continue;
        }
        let edge = net
            .vertices
            .iter()
            .map(|id| id.0.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{edge}")?;
    }
    out.flush()?;

    info!("wrote hypergraph to {}", path.display());
    Ok(())
}

/// Write one `vertex_id, vertex_name, is_fixed, x, y` row per vertex, ids
/// ascending. IO pins and fixed cells carry their parsed position with
/// is_fixed=1; movable cells get a (0, 0) placeholder.
pub fn write_vertex_info<P: AsRef<Path>>(graph: &DefGraph, path: P) -> io::Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);

    // IO entries inserted last; an id present in both tables resolves to the
    // IO position.
    let mut positions: HashMap<VertexId, (i64, i64)> =
        HashMap::with_capacity(graph.fixed_cells.len() + graph.io_pins.len());
    for vertex in &graph.fixed_cells {
        positions.insert(vertex.id, (vertex.x, vertex.y));
    }
    for vertex in &graph.io_pins {
        positions.insert(vertex.id, (vertex.x, vertex.y));
    }

    writeln!(out, "vertex_id, vertex_name, is_fixed, x, y")?;
    for index in 0..graph.vertex_count() {
        let id = VertexId(index);
        let (is_fixed, x, y) = match positions.get(&id) {
            Some(&(x, y)) => (1, x, y),
            None => (0, 0, 0),
        };
        match graph.names.name(id) {
            Some(name) => writeln!(out, "{index}, {name}, {is_fixed}, {x}, {y}")?,
            None => writeln!(out, "{index}, UNRESOLVED_{index}, {is_fixed}, {x}, {y}")?,
        }
    }
    out.flush()?;

    info!("wrote vertex info to {}", path.display());
    Ok(())
}
