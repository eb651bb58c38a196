//! Row materializer: re-slices a sheet at its header row and produces a
//! rectangular table with date columns normalized.

use crate::locate::HeaderLocation;
use crate::normalize::{DateNormalizer, NormalizeStats, Outcome};
use serde::Serialize;
use sheetdate_sheet::{CellValue, Row, Sheet};

/// Display-ready table. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedTable {
    pub headers: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl NormalizedTable {
    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (header excluded)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the table for `sheet` starting at `location`.
#[must_use]
pub fn materialize(
    sheet: &Sheet,
    location: &HeaderLocation,
    normalizer: &DateNormalizer,
) -> NormalizedTable {
    materialize_rows(sheet.data(), location, normalizer).0
}

/// Build the table from raw rows and count what the normalizer did.
///
/// Rows before the header are ignored. The header is copied verbatim. Each
/// later row is padded with empty strings or truncated to the header width;
/// date columns go through the normalizer, other empty cells become empty
/// strings and everything else is copied unchanged.
#[must_use]
pub fn materialize_rows(
    rows: &[Row],
    location: &HeaderLocation,
    normalizer: &DateNormalizer,
) -> (NormalizedTable, NormalizeStats) {
    let headers = location.header(rows).to_vec();
    let width = headers.len();
    let mut stats = NormalizeStats::default();

    let body = location.body(rows);
    let mut out_rows = Vec::with_capacity(body.len());

    for (offset, row) in body.iter().enumerate() {
        let mut out = Vec::with_capacity(width);
        for col in 0..width {
            let cell = row.get(col).unwrap_or(&CellValue::Empty);
            if location.is_date_column(col) {
                let (value, outcome) = normalizer.normalize_with_outcome(cell);
                stats.record(outcome);
                if outcome == Outcome::Unparsed && !cell.is_empty() {
                    tracing::debug!(
                        "Unconverted date cell at row {}, col {}: {}",
                        location.row_index + 1 + offset,
                        col,
                        cell
                    );
                }
                out.push(value);
            } else {
                out.push(cell.clone().or_empty_text());
            }
        }
        out_rows.push(out);
    }

    (
        NormalizedTable {
            headers,
            rows: out_rows,
        },
        stats,
    )
}
