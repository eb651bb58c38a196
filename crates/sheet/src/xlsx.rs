use crate::book::Book;
use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::{Row, Sheet};
use calamine::{open_workbook_auto, Data, ExcelDateTime, ExcelDateTimeType, Range, Reader};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        // Date-formatted cells keep their serial so the normalizer sees a number
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => {
            tracing::warn!("Cell error value {:?} kept as text", e);
            CellValue::Text(e.to_string())
        }
    }
}

/// Whether a date cell was stored with the 1904 epoch. calamine keeps the raw
/// serial and only applies the offset when converting, so compare against the
/// same serial read as 1900-based.
fn is_1904_datetime(dt: &ExcelDateTime) -> bool {
    let as_1900 = ExcelDateTime::new(dt.as_f64(), ExcelDateTimeType::DateTime, false);
    dt.as_datetime() != as_1900.as_datetime()
}

/// Rows anchored at A1: a used range starting at C3 gets two empty rows and
/// two empty leading cells per row, so cell positions match the file.
fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let lead = start_col as usize;

    let mut rows: Vec<Row> = vec![Vec::new(); start_row as usize];
    rows.extend(range.rows().map(|row| {
        let mut cells = vec![CellValue::Empty; lead];
        cells.extend(row.iter().map(data_to_cell_value));
        cells
    }));
    rows
}

impl Book {
    /// Load a book from a workbook file (all sheets)
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_workbook<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let book_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Book1");
        let mut book = Book::with_name(book_name);

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;
            if !book.is_date_1904() {
                let uses_1904 = range.used_cells().any(|(_, _, data)| {
                    matches!(data, Data::DateTime(dt) if is_1904_datetime(dt))
                });
                if uses_1904 {
                    tracing::debug!("'{}' stores dates in the 1904 system", path.display());
                    book.set_date_1904(true);
                }
            }

            let mut sheet = Sheet::with_name(&sheet_name);
            *sheet.data_mut() = range_to_rows(&range);
            tracing::debug!(
                "Decoded sheet '{}' ({} rows)",
                sheet_name,
                sheet.row_count()
            );

            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }
}
