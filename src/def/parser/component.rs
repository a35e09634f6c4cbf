// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! COMPONENTS record parser

use super::common::{find_keyword, parse_coordinate_pair, record_name};
use super::RecordParser;

/// One COMPONENTS entry. Only the instance name and the optional `FIXED`
/// position matter for graph extraction; a `PLACED` entry is still movable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    pub name: String,
    pub fixed: Option<(i64, i64)>,
}

/// Parser for DEF COMPONENTS section records
pub struct ComponentParser;

impl RecordParser for ComponentParser {
    type Item = ComponentRecord;

    fn parse_record(&self, statement: &str) -> Result<ComponentRecord, String> {
        let parts: Vec<&str> = statement.split_whitespace().collect();
        let name = record_name(&parts)
            .ok_or_else(|| "missing `-` record marker or component name".to_string())?;

        let fixed = match find_keyword(&parts, "FIXED") {
            Some(index) => match parse_coordinate_pair(&parts, index + 1) {
                Some(pair) => Some(pair),
                None => {
                    return Err(format!(
                        "FIXED clause of `{name}` has no `( x y )` coordinates"
                    ))
                }
            },
            None => None,
        };

        Ok(ComponentRecord { name, fixed })
    }

    fn section_name() -> &'static str {
        "COMPONENTS"
    }
}
