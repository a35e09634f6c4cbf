// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! NETS record parser

use super::common::record_name;
use super::RecordParser;

/// One NETS entry: the net name and the connection target names in source
/// order. A `( PIN name )` group connects the IO pin by its own name; any
/// other `( instance pin )` group connects the component instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetRecord {
    pub name: String,
    pub targets: Vec<String>,
}

/// Parser for DEF NETS section records
pub struct NetParser;

impl RecordParser for NetParser {
    type Item = NetRecord;

    fn parse_record(&self, statement: &str) -> Result<NetRecord, String> {
        let parts: Vec<&str> = statement.split_whitespace().collect();
        let name = record_name(&parts)
            .ok_or_else(|| "missing `-` record marker or net name".to_string())?;

        let mut targets = Vec::new();
        let mut i = 0;
        while i < parts.len() {
            // Connection group: ( A B )
            if parts[i] == "(" && i + 3 < parts.len() && parts[i + 3] == ")" {
                let a = parts[i + 1];
                let b = parts[i + 2];
                let target = if a == "PIN" { b } else { a };
                targets.push(target.to_string());
                i += 4;
            } else {
                i += 1;
            }
        }

        Ok(NetRecord { name, targets })
    }

    fn section_name() -> &'static str {
        "NETS"
    }
}
