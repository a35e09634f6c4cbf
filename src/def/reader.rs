// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use std::fs;
use std::path::Path;

use log::debug;

use super::def_parser::{parse_def_graph, ParseOptions};
use super::parser::ParseResult;
use super::DefGraph;

/// Loads a DEF file and extracts its hypergraph. Net exclusion is
/// configurable; by default the `clk_i` clock net is dropped.
#[derive(Debug, Clone, Default)]
pub struct DefReader {
    options: ParseOptions,
}

impl DefReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop an additional net from the hypergraph.
    pub fn with_excluded_net(mut self, name: impl Into<String>) -> Self {
        self.options.excluded_nets.insert(name.into());
        self
    }

    /// Drop several nets from the hypergraph.
    pub fn with_excluded_nets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .excluded_nets
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Keep every net, including the default-excluded clock net.
    pub fn clear_excluded_nets(mut self) -> Self {
        self.options.excluded_nets.clear();
        self
    }

    /// Parse DEF text already held in memory.
    pub fn parse(&self, content: &str) -> ParseResult<DefGraph> {
        parse_def_graph(content, &self.options)
    }

    /// Read and parse a DEF file.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<DefGraph, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!("loaded DEF file {} ({} bytes)", path.display(), content.len());
        Ok(self.parse(&content)?)
    }
}
