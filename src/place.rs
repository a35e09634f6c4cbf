// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Placement coordinate injection
//!
//! Streams a DEF file and rewrites every line containing `UNPLACED`, consuming
//! one position per occurrence in top-to-bottom order. Positions must be
//! supplied in movable-cell vertex order, the same order the parser assigns
//! component indices; [`DefGraph::tag_positions`] produces that sequence with
//! each coordinate tagged by its vertex id.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::def::{DefGraph, VertexId};

const UNPLACED: &str = "UNPLACED";

/// A movable cell's computed position, tagged with the vertex it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellPosition {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
}

/// Errors raised while injecting positions into a DEF file
#[derive(Debug)]
pub enum InjectError {
    /// Fewer positions than `UNPLACED` records in the source file.
    PositionsExhausted { replaced: usize },
    /// Raw coordinate count does not match the graph's movable cell count.
    PositionCountMismatch { expected: usize, found: usize },
    Io(io::Error),
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::PositionsExhausted { replaced } => {
                write!(
                    f,
                    "fewer positions than UNPLACED records (exhausted after {replaced} replacements)"
                )
            }
            InjectError::PositionCountMismatch { expected, found } => {
                write!(f, "expected {expected} positions for movable cells, got {found}")
            }
            InjectError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for InjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InjectError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for InjectError {
    fn from(err: io::Error) -> Self {
        InjectError::Io(err)
    }
}

impl DefGraph {
    /// Tag raw `(x, y)` coordinates with movable-cell vertex ids, in the
    /// order the placement algorithm received the cells.
    pub fn tag_positions(&self, coords: &[(f64, f64)]) -> Result<Vec<CellPosition>, InjectError> {
        if coords.len() != self.movable_cells.len() {
            return Err(InjectError::PositionCountMismatch {
                expected: self.movable_cells.len(),
                found: coords.len(),
            });
        }
        Ok(self
            .movable_cells
            .iter()
            .zip(coords)
            .map(|(&id, &(x, y))| CellPosition { id, x, y })
            .collect())
    }
}

/// Load raw `(x, y)` coordinate rows from a headerless CSV file.
pub fn read_positions_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<(f64, f64)>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let (x, y): (f64, f64) = record?;
        rows.push((x, y));
    }
    Ok(rows)
}

/// Inject tagged positions into a DEF file. Returns the output path, whose
/// extension is normalized to `.def`.
pub fn write_placed_def<P: AsRef<Path>, Q: AsRef<Path>>(
    def_path: P,
    positions: &[CellPosition],
    out_path: Q,
) -> Result<PathBuf, InjectError> {
    let mut supply = positions.iter().map(|p| (Some(p.id), p.x, p.y));
    run_injection(
        def_path.as_ref(),
        &mut supply,
        positions.len(),
        out_path.as_ref(),
    )
}

/// Inject raw positions in sequence order. The caller is responsible for
/// matching the parser's movable-cell order; prefer [`write_placed_def`] with
/// [`DefGraph::tag_positions`].
pub fn write_placed_def_untagged<P: AsRef<Path>, Q: AsRef<Path>>(
    def_path: P,
    positions: &[(f64, f64)],
    out_path: Q,
) -> Result<PathBuf, InjectError> {
    let mut supply = positions.iter().map(|&(x, y)| (None::<VertexId>, x, y));
    run_injection(
        def_path.as_ref(),
        &mut supply,
        positions.len(),
        out_path.as_ref(),
    )
}

fn run_injection(
    def_path: &Path,
    positions: &mut dyn Iterator<Item = (Option<VertexId>, f64, f64)>,
    supplied: usize,
    out_path: &Path,
) -> Result<PathBuf, InjectError> {
    let out_path = normalize_def_extension(out_path);
    // Build the output beside its destination and rename on full success, so
    // a failed injection leaves no partial artifact.
    let tmp_path = out_path.with_extension("def.tmp");

    match inject(def_path, &tmp_path, positions) {
        Ok(replaced) => {
            if replaced < supplied {
                warn!(
                    "{} surplus positions ignored after {} replacements",
                    supplied - replaced,
                    replaced
                );
            }
            fs::rename(&tmp_path, &out_path)?;
            Ok(out_path)
        }
        Err(err) => {
            let _ = fs::remove_file(&tmp_path);
            Err(err)
        }
    }
}

fn inject(
    src: &Path,
    dst: &Path,
    positions: &mut dyn Iterator<Item = (Option<VertexId>, f64, f64)>,
) -> Result<usize, InjectError> {
    let mut reader = BufReader::new(File::open(src)?);
    let mut writer = BufWriter::new(File::create(dst)?);

    let mut line = String::new();
    let mut replaced = 0usize;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.contains(UNPLACED) {
            let (id, x, y) = positions
                .next()
                .ok_or(InjectError::PositionsExhausted { replaced })?;
            let clause = format!("PLACED ( {} {} ) N", truncate(x), truncate(y));
            match id {
                Some(id) => debug!("vertex {id}: {clause}"),
                None => debug!("position {replaced}: {clause}"),
            }
            let patched = line.replacen(UNPLACED, &clause, 1);
            writer.write_all(patched.as_bytes())?;
            replaced += 1;
        } else {
            writer.write_all(line.as_bytes())?;
        }
    }
    writer.flush()?;
    Ok(replaced)
}

/// Truncate toward zero, matching the DEF integer coordinate convention.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

fn normalize_def_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("def") => path.to_path_buf(),
        _ => path.with_extension("def"),
    }
}
