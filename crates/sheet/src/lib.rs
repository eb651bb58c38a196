//! Sheet/Book model for sheetdate
//!
//! Holds decoded spreadsheets as raw, read-only cell grids. A [`Book`] is an
//! ordered collection of named [`Sheet`]s; each sheet is a list of possibly
//! ragged rows of [`CellValue`]s (empty, boolean, number or text).
//!
//! Decoding is delegated to existing libraries: calamine for workbook formats
//! (xlsx, xlsm, xlsb, xls, ods) and the csv crate for delimited text.
//!
//! # Examples
//!
//! ```
//! use sheetdate_sheet::{Book, CellValue, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet(
//!     "User Details",
//!     Sheet::from_data(vec![
//!         vec![CellValue::from("Name"), CellValue::from("Hire Date")],
//!         vec![CellValue::from("Alice"), CellValue::from(44197)],
//!     ]),
//! )
//! .unwrap();
//!
//! let sheet = book.find_sheet_ignore_case("user details").unwrap();
//! assert_eq!(sheet.row_count(), 2);
//! ```
//!
//! ## Loading from disk
//!
//! ```no_run
//! use sheetdate_sheet::{Book, FileLoadOptions};
//!
//! let book = Book::from_path("staff.xlsx", &FileLoadOptions::default()).unwrap();
//! ```

mod book;
mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export book types and options.
pub use book::{Book, FileLoadOptions};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet types.
pub use sheet::{Row, Sheet};
