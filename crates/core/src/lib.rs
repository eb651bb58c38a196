//! # sheetdate-core
//!
//! Header detection and date normalization over decoded spreadsheets.
//!
//! This crate provides:
//! - Header row and date column location ([`locate`])
//! - Row materialization into a rectangular table ([`materialize`])
//! - Serial and text date normalization ([`normalize`])
//! - A pipeline tying the stages together ([`Pipeline`])
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use sheetdate_core::{NormalizeOptions, Pipeline, PipelineOptions, SerialZone};
//! use sheetdate_sheet::{Book, CellValue, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet(
//!     "User Details",
//!     Sheet::from_data(vec![
//!         vec![CellValue::from("Name"), CellValue::from("Hire Date")],
//!         vec![CellValue::from("Alice"), CellValue::from(44197)],
//!         vec![CellValue::from("Bob"), CellValue::from("March 3, 2020")],
//!     ]),
//! )
//! .unwrap();
//!
//! let options = PipelineOptions::default().with_normalize(
//!     NormalizeOptions::default()
//!         .with_zone(SerialZone::Utc)
//!         .with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
//! );
//! let processed = Pipeline::new(options).unwrap().run(&book).unwrap();
//!
//! assert_eq!(processed.table.rows[0][1], CellValue::text("01/01/2021"));
//! assert_eq!(processed.table.rows[1][1], CellValue::text("03/03/2020"));
//! ```

/// Error types and result aliases.
pub mod error;
/// Header row detection.
pub mod locate;
/// Table materialization.
pub mod materialize;
/// Date value normalization.
pub mod normalize;
/// Configuration for each stage.
pub mod options;
/// End-to-end processing.
pub mod pipeline;

pub use error::{DateError, DateResult};
pub use locate::{locate, HeaderLocation};
pub use materialize::{materialize, NormalizedTable};
pub use normalize::{DateNormalizer, NormalizeStats, Outcome, PatternTable};
pub use options::{
    DateSystem, LocatorOptions, NormalizeOptions, PipelineOptions, SerialZone,
    DEFAULT_KEYWORD, DEFAULT_OUTPUT_FORMAT, DEFAULT_SHEET_NAME,
};
pub use pipeline::{process_book, select_sheet, Pipeline, Processed};
