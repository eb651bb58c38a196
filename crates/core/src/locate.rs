//! Header row and date column detection.

use crate::options::LocatorOptions;
use serde::Serialize;
use sheetdate_sheet::{CellValue, Row, Sheet};
use std::collections::BTreeSet;

/// Where the table starts and which of its columns hold dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderLocation {
    /// Index of the header row in the sheet
    pub row_index: usize,
    /// Header columns whose text contains the keyword
    pub date_columns: BTreeSet<usize>,
}

impl HeaderLocation {
    /// Whether `col` is a date column
    #[must_use]
    pub fn is_date_column(&self, col: usize) -> bool {
        self.date_columns.contains(&col)
    }

    /// The header row within `rows`
    #[must_use]
    pub fn header<'a>(&self, rows: &'a [Row]) -> &'a [CellValue] {
        rows.get(self.row_index).map_or(&[][..], Vec::as_slice)
    }

    /// Rows after the header within `rows`
    #[must_use]
    pub fn body<'a>(&self, rows: &'a [Row]) -> &'a [Row] {
        rows.get(self.row_index + 1..).unwrap_or(&[])
    }
}

/// Find the header row of a sheet.
#[must_use]
pub fn locate(sheet: &Sheet, options: &LocatorOptions) -> Option<HeaderLocation> {
    locate_rows(sheet.data(), &options.keyword)
}

/// Scan rows top to bottom and stop at the first one with at least one text
/// cell containing `keyword` (case-insensitive). Every matching column of that
/// row is recorded.
#[must_use]
pub fn locate_rows(rows: &[Row], keyword: &str) -> Option<HeaderLocation> {
    let keyword = keyword.to_lowercase();

    rows.iter().enumerate().find_map(|(row_index, row)| {
        let date_columns: BTreeSet<usize> = row
            .iter()
            .enumerate()
            .filter(|(_, cell)| is_keyword_cell(cell, &keyword))
            .map(|(col, _)| col)
            .collect();

        if date_columns.is_empty() {
            return None;
        }
        tracing::debug!(
            "Header row {} has date columns {:?}",
            row_index,
            date_columns
        );
        Some(HeaderLocation {
            row_index,
            date_columns,
        })
    })
}

/// Only text cells can be headers; `keyword` is already lowercased.
fn is_keyword_cell(cell: &CellValue, keyword: &str) -> bool {
    cell.as_text()
        .is_some_and(|text| text.to_lowercase().contains(keyword))
}
