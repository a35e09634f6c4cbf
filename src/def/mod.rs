// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a vertex in the hypergraph. Cells occupy `[0, cell_count)`,
/// IO pins `[cell_count, cell_count + io_count)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VertexId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexKind {
    StandardCell,
    FixedMacro,
    IoPin,
}

/// A vertex with an immutable position: a `FIXED` component or an IO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedVertex {
    pub id: VertexId,
    pub x: i64,
    pub y: i64,
}

/// One hyperedge. Vertex order is the order of connection tokens in the
/// source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
    pub vertices: Vec<VertexId>,
}

/// Bidirectional name <-> id table. Built once during parsing; ids are
/// assigned in insertion order and the table is read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameIndex {
    names: Vec<String>,
    index: HashMap<String, VertexId>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name and assign it the next vertex id. Returns `None` if
    /// the name is already taken.
    pub fn insert(&mut self, name: &str) -> Option<VertexId> {
        if self.index.contains_key(name) {
            return None;
        }
        let id = VertexId(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        Some(id)
    }

    pub fn resolve(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: VertexId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything extracted from one DEF parse: counts, the fixed/movable split,
/// IO pins, resolved hyperedges and the name table. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefGraph {
    /// Number of macros + standard cells (COMPONENTS entries).
    pub cell_count: usize,
    /// Number of IO pins (PINS entries).
    pub io_count: usize,
    pub fixed_cells: Vec<FixedVertex>,
    pub movable_cells: Vec<VertexId>,
    pub io_pins: Vec<FixedVertex>,
    pub nets: Vec<Net>,
    pub names: NameIndex,
}

impl DefGraph {
    pub fn vertex_count(&self) -> usize {
        self.cell_count + self.io_count
    }

    pub fn movable_count(&self) -> usize {
        self.movable_cells.len()
    }

    pub fn vertex_kind(&self, id: VertexId) -> Option<VertexKind> {
        if id.0 >= self.vertex_count() {
            None
        } else if id.0 >= self.cell_count {
            Some(VertexKind::IoPin)
        } else if self.fixed_cells.iter().any(|v| v.id == id) {
            Some(VertexKind::FixedMacro)
        } else {
            Some(VertexKind::StandardCell)
        }
    }

    pub fn is_fixed(&self, id: VertexId) -> bool {
        matches!(
            self.vertex_kind(id),
            Some(VertexKind::FixedMacro | VertexKind::IoPin)
        )
    }

    /// Position of a fixed vertex. IO pins take precedence over fixed cells,
    /// movable cells have no position.
    pub fn position(&self, id: VertexId) -> Option<(i64, i64)> {
        self.io_pins
            .iter()
            .chain(self.fixed_cells.iter())
            .find(|v| v.id == id)
            .map(|v| (v.x, v.y))
    }
}

pub mod def_parser;
pub mod parser;
pub mod preprocessor;
pub mod reader;
