// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Record parsing framework for DEF sections
//!
//! Each section (COMPONENTS, PINS, NETS) provides a [`RecordParser`] that
//! turns one preprocessed logical statement into one record. The generic
//! [`parse_records`] driver runs a parser over a section body and attaches
//! original line spans to failures.

pub mod common;
pub mod component;
pub mod net;
pub mod pin;

use std::fmt;
use std::ops::Range;

use super::preprocessor::PreprocessedDef;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Error types that can occur while extracting the graph from a DEF file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required section boundary (`NETS <n> ;`, `END NETS`, ...) is absent.
    SectionNotFound(&'static str),
    /// A record inside a section could not be parsed.
    MalformedRecord {
        section: &'static str,
        location: String,
        reason: String,
    },
    /// A section header declares a different entry count than was parsed.
    CountMismatch {
        section: &'static str,
        declared: usize,
        found: usize,
    },
    /// The same name is used by more than one component or pin.
    DuplicateName(String),
    /// A net connection references a name absent from the name index.
    UnresolvedConnection { net: String, target: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::SectionNotFound(marker) => {
                write!(f, "section marker `{marker}` not found")
            }
            ParseError::MalformedRecord {
                section,
                location,
                reason,
            } => {
                write!(f, "malformed {section} record ({location}): {reason}")
            }
            ParseError::CountMismatch {
                section,
                declared,
                found,
            } => {
                write!(
                    f,
                    "{section} declares {declared} entries but {found} were parsed"
                )
            }
            ParseError::DuplicateName(name) => {
                write!(f, "duplicate component/pin name `{name}`")
            }
            ParseError::UnresolvedConnection { net, target } => {
                write!(f, "net `{net}` references unknown name `{target}`")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one logical statement of a section body into one record.
pub trait RecordParser {
    /// The record type this parser produces
    type Item;

    /// Parse a complete record statement. The error string is the failure
    /// reason; the section driver adds section name and line span.
    fn parse_record(&self, statement: &str) -> Result<Self::Item, String>;

    /// Section this parser belongs to, for error messages
    fn section_name() -> &'static str;
}

/// Run a record parser over a section body (statement index range, header
/// and END marker excluded).
pub fn parse_records<P: RecordParser>(
    parser: &P,
    source: &PreprocessedDef,
    body: Range<usize>,
) -> ParseResult<Vec<P::Item>> {
    let mut items = Vec::with_capacity(body.len());
    for index in body {
        let statement = &source.statements[index];
        match parser.parse_record(statement) {
            Ok(item) => items.push(item),
            Err(reason) => {
                return Err(ParseError::MalformedRecord {
                    section: P::section_name(),
                    location: source.location(index),
                    reason,
                })
            }
        }
    }
    Ok(items)
}
