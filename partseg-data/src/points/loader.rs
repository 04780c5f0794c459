//! Point file loading functions
//!
//! Shape files are plain text: one point per line, seven whitespace-separated
//! columns (x y z nx ny nz label).

use crate::types::{RAW_COLUMNS, RawPointRow};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Errors that can occur while reading a shape point file.
#[derive(Debug, thiserror::Error)]
pub enum PointsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },
}

/// Parse whitespace-separated point rows from a reader.
///
/// Blank lines are skipped; every other line must carry exactly
/// [`RAW_COLUMNS`] float columns.
pub fn read_points<R: BufRead>(reader: R) -> Result<Vec<RawPointRow>, PointsError> {
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != RAW_COLUMNS {
            return Err(PointsError::ColumnCount {
                line: i + 1,
                expected: RAW_COLUMNS,
                found: tokens.len(),
            });
        }

        let mut row: RawPointRow = [0.0; RAW_COLUMNS];
        for (slot, token) in row.iter_mut().zip(&tokens) {
            *slot = token.parse().map_err(|_| PointsError::InvalidNumber {
                line: i + 1,
                token: token.to_string(),
            })?;
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Load a shape point file from disk.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_point_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawPointRow>, PointsError> {
    let file = File::open(path.as_ref())?;
    let rows = read_points(BufReader::new(file))?;
    debug!("loaded {} points", rows.len());
    Ok(rows)
}
