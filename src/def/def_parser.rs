// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! DEF graph extraction
//!
//! Locates the COMPONENTS, PINS and NETS sections, assigns the vertex index
//! space (components in declaration order, IO pins contiguously after them),
//! resolves net connectivity through the shared name index and assembles the
//! immutable [`DefGraph`].

use std::collections::HashSet;
use std::ops::Range;

use log::{debug, info};
use nom::{
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{multispace0, space1},
    IResult,
};

use super::parser::component::ComponentParser;
use super::parser::net::NetParser;
use super::parser::pin::PinParser;
use super::parser::{parse_records, ParseError, ParseResult};
use super::preprocessor::{preprocess, PreprocessedDef};
use super::{DefGraph, FixedVertex, NameIndex, Net};

/// Name of the clock net dropped from the hypergraph by default.
pub const DEFAULT_EXCLUDED_NET: &str = "clk_i";

/// Tunables for graph extraction.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Nets dropped entirely from the hypergraph (no hyperedge is produced).
    pub excluded_nets: HashSet<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        let mut excluded_nets = HashSet::new();
        excluded_nets.insert(DEFAULT_EXCLUDED_NET.to_string());
        Self { excluded_nets }
    }
}

impl ParseOptions {
    /// Options with an empty exclusion set.
    pub fn keep_all_nets() -> Self {
        Self {
            excluded_nets: HashSet::new(),
        }
    }
}

/// Section header grammar: `KEYWORD <count>` (the `;` terminator is already
/// consumed by the preprocessor). Keywords match case-insensitively.
fn section_header<'a>(input: &'a str, keyword: &str) -> IResult<&'a str, usize> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag_no_case(keyword)(input)?;
    let (input, _) = space1(input)?;
    let (input, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, digits.parse::<usize>().unwrap_or(0)))
}

/// Section end grammar: `END KEYWORD`.
fn end_marker<'a>(input: &'a str, keyword: &str) -> IResult<&'a str, ()> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag_no_case("END")(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag_no_case(keyword)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

fn match_section_header(statement: &str, keyword: &str) -> Option<usize> {
    match section_header(statement, keyword) {
        Ok((rest, count)) if rest.is_empty() => Some(count),
        _ => None,
    }
}

fn is_end_marker(statement: &str, keyword: &str) -> bool {
    matches!(end_marker(statement, keyword), Ok((rest, ())) if rest.is_empty())
}

struct SectionSpan {
    declared: usize,
    body: Range<usize>,
}

fn end_label(keyword: &'static str) -> &'static str {
    match keyword {
        "COMPONENTS" => "END COMPONENTS",
        "PINS" => "END PINS",
        "NETS" => "END NETS",
        _ => "END",
    }
}

/// Locate a section's declared count and body statement range. The first
/// matching header wins.
fn locate_section(source: &PreprocessedDef, keyword: &'static str) -> ParseResult<SectionSpan> {
    for (index, statement) in source.statements.iter().enumerate() {
        if let Some(declared) = match_section_header(statement, keyword) {
            for end in index + 1..source.statements.len() {
                if is_end_marker(&source.statements[end], keyword) {
                    return Ok(SectionSpan {
                        declared,
                        body: index + 1..end,
                    });
                }
            }
            return Err(ParseError::SectionNotFound(end_label(keyword)));
        }
    }
    Err(ParseError::SectionNotFound(keyword))
}

fn check_count(section: &'static str, declared: usize, found: usize) -> ParseResult<()> {
    if declared != found {
        return Err(ParseError::CountMismatch {
            section,
            declared,
            found,
        });
    }
    Ok(())
}

/// Parse DEF text into the hypergraph aggregate.
pub fn parse_def_graph(content: &str, options: &ParseOptions) -> ParseResult<DefGraph> {
    let source = preprocess(content);

    let components = locate_section(&source, "COMPONENTS")?;
    let pins = locate_section(&source, "PINS")?;
    let nets = locate_section(&source, "NETS")?;

    let component_records = parse_records(&ComponentParser, &source, components.body)?;
    check_count("COMPONENTS", components.declared, component_records.len())?;
    let pin_records = parse_records(&PinParser, &source, pins.body)?;
    check_count("PINS", pins.declared, pin_records.len())?;
    let net_records = parse_records(&NetParser, &source, nets.body)?;

    // Vertex index space: components first, in declaration order.
    let mut names = NameIndex::new();
    let mut fixed_cells = Vec::new();
    let mut movable_cells = Vec::new();
    for record in &component_records {
        let id = names
            .insert(&record.name)
            .ok_or_else(|| ParseError::DuplicateName(record.name.clone()))?;
        match record.fixed {
            Some((x, y)) => fixed_cells.push(FixedVertex { id, x, y }),
            None => movable_cells.push(id),
        }
    }

    // IO pins follow contiguously.
    let mut io_pins = Vec::with_capacity(pin_records.len());
    for record in &pin_records {
        let id = names
            .insert(&record.name)
            .ok_or_else(|| ParseError::DuplicateName(record.name.clone()))?;
        io_pins.push(FixedVertex {
            id,
            x: record.x,
            y: record.y,
        });
    }

    let mut resolved_nets = Vec::with_capacity(net_records.len());
    for record in net_records {
        if options.excluded_nets.contains(&record.name) {
            debug!("dropping excluded net `{}`", record.name);
            continue;
        }
        let mut vertices = Vec::with_capacity(record.targets.len());
        for target in &record.targets {
            let id = names
                .resolve(target)
                .ok_or_else(|| ParseError::UnresolvedConnection {
                    net: record.name.clone(),
                    target: target.clone(),
                })?;
            vertices.push(id);
        }
        resolved_nets.push(Net {
            name: record.name,
            vertices,
        });
    }

    let graph = DefGraph {
        cell_count: component_records.len(),
        io_count: pin_records.len(),
        fixed_cells,
        movable_cells,
        io_pins,
        nets: resolved_nets,
        names,
    };

    info!(
        "parsed DEF netlist: {} components ({} fixed), {} IOs, {} nets",
        graph.cell_count,
        graph.fixed_cells.len(),
        graph.io_count,
        graph.nets.len()
    );

    Ok(graph)
}
