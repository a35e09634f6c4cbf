// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! PINS record parser

use super::common::{placement_coordinates, record_name};
use super::RecordParser;

/// One PINS entry. IO pins are placement-fixed by convention, so the
/// position is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    pub name: String,
    pub x: i64,
    pub y: i64,
}

/// Parser for DEF PINS section records
pub struct PinParser;

impl RecordParser for PinParser {
    type Item = PinRecord;

    fn parse_record(&self, statement: &str) -> Result<PinRecord, String> {
        let parts: Vec<&str> = statement.split_whitespace().collect();
        let name = record_name(&parts)
            .ok_or_else(|| "missing `-` record marker or pin name".to_string())?;

        let (x, y) = placement_coordinates(&parts).ok_or_else(|| {
            format!("pin `{name}` has no PLACED/FIXED `( x y )` clause")
        })?;

        Ok(PinRecord { name, x, y })
    }

    fn section_name() -> &'static str {
        "PINS"
    }
}
