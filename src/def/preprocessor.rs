// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! DEF Preprocessor
//!
//! Pass 1: turns raw DEF text into logical statements by:
//! - Removing comments (# character when preceded by whitespace)
//! - Splitting at every semicolon, merging across physical lines until one
//! - Flushing `END <SECTION>` lines as standalone statements
//! - Preserving line number mappings for error reporting

/// Mapping between a logical statement and its original file lines
#[derive(Debug, Clone)]
pub struct LineMapping {
    pub statement: usize,      // Index in preprocessed statements
    pub original_start: usize, // Starting line in original file (0-indexed)
    pub original_end: usize,   // Ending line in original file (0-indexed)
}

impl LineMapping {
    pub fn new(statement: usize, original_start: usize, original_end: usize) -> Self {
        Self {
            statement,
            original_start,
            original_end,
        }
    }
}

/// Preprocessed DEF content with line mappings
#[derive(Debug, Default)]
pub struct PreprocessedDef {
    pub statements: Vec<String>,
    pub mappings: Vec<LineMapping>,
}

impl PreprocessedDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get original line range for a statement index
    pub fn original_range(&self, statement: usize) -> Option<(usize, usize)> {
        self.mappings
            .get(statement)
            .map(|m| (m.original_start, m.original_end))
    }

    /// Human-readable 1-based location label for a statement, e.g. `line 12`
    /// or `lines 12-14`.
    pub fn location(&self, statement: usize) -> String {
        match self.original_range(statement) {
            Some((start, end)) if start == end => format!("line {}", start + 1),
            Some((start, end)) => format!("lines {}-{}", start + 1, end + 1),
            None => format!("statement {statement}"),
        }
    }

    fn push(&mut self, statement: String, start: usize, end: usize) {
        let index = self.statements.len();
        self.statements.push(statement);
        self.mappings.push(LineMapping::new(index, start, end));
    }
}

/// Preprocess DEF file content into semicolon-delimited logical statements.
/// The semicolons themselves are consumed; `END <SECTION>` markers, which
/// carry no terminator, become statements of their own.
pub fn preprocess(content: &str) -> PreprocessedDef {
    let mut result = PreprocessedDef::new();

    let mut current = String::new();
    let mut start_line: usize = 0;
    let mut last_line: usize = 0;

    for (lineno, raw) in content.lines().enumerate() {
        last_line = lineno;
        let text = remove_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        if is_end_statement(text) {
            // Flush any unterminated statement before the section closes.
            if !current.is_empty() {
                let stmt = std::mem::take(&mut current);
                result.push(stmt, start_line, lineno.saturating_sub(1));
            }
            // Some writers terminate END markers with a semicolon.
            let marker = text.trim_end_matches(';').trim_end();
            result.push(marker.to_string(), lineno, lineno);
            continue;
        }

        let mut rest = text;
        while let Some(pos) = rest.find(';') {
            let piece = rest[..pos].trim();
            if !piece.is_empty() {
                if current.is_empty() {
                    start_line = lineno;
                } else {
                    current.push(' ');
                }
                current.push_str(piece);
            }
            if !current.is_empty() {
                let stmt = std::mem::take(&mut current);
                result.push(stmt, start_line, lineno);
            }
            rest = &rest[pos + 1..];
        }

        let tail = rest.trim();
        if !tail.is_empty() {
            if current.is_empty() {
                start_line = lineno;
            } else {
                current.push(' ');
            }
            current.push_str(tail);
        }
    }

    // Incomplete statement at end of file
    if !current.is_empty() {
        let stmt = std::mem::take(&mut current);
        result.push(stmt, start_line, last_line);
    }

    result
}

fn is_end_statement(text: &str) -> bool {
    let mut tokens = text.split_whitespace();
    matches!(tokens.next(), Some(first) if first.eq_ignore_ascii_case("END"))
}

/// Remove comment from a line. Comments start with # when preceded by the
/// start of line, a space, or a tab.
fn remove_comment(line: &str) -> &str {
    if let Some(pos) = find_comment_start(line) {
        &line[..pos]
    } else {
        line
    }
}

fn find_comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] == b'#' && (i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t') {
            return Some(i);
        }
    }
    None
}
