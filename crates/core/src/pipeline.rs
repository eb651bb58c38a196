//! Locate → materialize → normalize, run once per loaded workbook.

use crate::error::{DateError, DateResult};
use crate::locate::{locate, HeaderLocation};
use crate::materialize::{materialize_rows, NormalizedTable};
use crate::normalize::{DateNormalizer, NormalizeStats};
use crate::options::{DateSystem, PipelineOptions};
use serde::Serialize;
use sheetdate_sheet::{Book, Sheet};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Processed {
    /// Name of the sheet that was processed
    pub sheet_name: String,
    pub location: HeaderLocation,
    pub table: NormalizedTable,
    pub stats: NormalizeStats,
}

impl Processed {
    /// Date column indices, for renderers that highlight them
    #[must_use]
    pub fn date_columns(&self) -> &BTreeSet<usize> {
        &self.location.date_columns
    }
}

/// A configured pipeline. Construction compiles the pattern table once; each
/// run produces an independent [`Processed`] value.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
    normalizer: DateNormalizer,
}

impl Pipeline {
    /// Build a pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the normalizer options are invalid.
    pub fn new(options: PipelineOptions) -> DateResult<Self> {
        let normalizer = DateNormalizer::new(&options.normalize)?;
        Ok(Self {
            options,
            normalizer,
        })
    }

    /// The configured normalizer
    #[must_use]
    pub fn normalizer(&self) -> &DateNormalizer {
        &self.normalizer
    }

    /// Select the configured sheet from `book` and process it.
    ///
    /// # Errors
    ///
    /// [`DateError::SheetNotFound`] when no sheet name matches, or
    /// [`DateError::HeaderNotFound`] when the sheet has no header row.
    pub fn run(&self, book: &Book) -> DateResult<Processed> {
        let sheet = select_sheet(book, &self.options.sheet_name)?;
        let normalizer = self.normalizer_for(book);
        self.process(sheet, &normalizer)
    }

    /// Process one sheet with the configured date system.
    ///
    /// # Errors
    ///
    /// [`DateError::HeaderNotFound`] when the sheet has no header row.
    pub fn run_sheet(&self, sheet: &Sheet) -> DateResult<Processed> {
        self.process(sheet, &self.normalizer)
    }

    /// The normalizer for `book`: a configured date system wins, otherwise the
    /// workbook's own epoch is used.
    fn normalizer_for(&self, book: &Book) -> Cow<'_, DateNormalizer> {
        if self.options.normalize.date_system.is_none() && book.is_date_1904() {
            tracing::debug!("Book '{}' uses the 1904 date system", book.name());
            Cow::Owned(
                self.normalizer
                    .clone()
                    .with_date_system(DateSystem::Excel1904),
            )
        } else {
            Cow::Borrowed(&self.normalizer)
        }
    }

    fn process(&self, sheet: &Sheet, normalizer: &DateNormalizer) -> DateResult<Processed> {
        let location =
            locate(sheet, &self.options.locator).ok_or_else(|| DateError::HeaderNotFound {
                sheet: sheet.name().to_string(),
                keyword: self.options.locator.keyword.clone(),
            })?;

        let (table, stats) = materialize_rows(sheet.data(), &location, normalizer);

        tracing::info!(
            "Sheet '{}': header at row {}, {} date column(s), {} row(s), {} date cell(s) converted",
            sheet.name(),
            location.row_index,
            location.date_columns.len(),
            table.row_count(),
            stats.converted()
        );
        if stats.unparsed > 0 {
            tracing::warn!(
                "Sheet '{}': {} date cell(s) left unconverted",
                sheet.name(),
                stats.unparsed
            );
        }

        Ok(Processed {
            sheet_name: sheet.name().to_string(),
            location,
            table,
            stats,
        })
    }
}

/// Find a sheet by case-insensitive name.
///
/// # Errors
///
/// [`DateError::SheetNotFound`] listing the sheets that do exist.
pub fn select_sheet<'a>(book: &'a Book, name: &str) -> DateResult<&'a Sheet> {
    book.find_sheet_ignore_case(name)
        .ok_or_else(|| DateError::SheetNotFound {
            name: name.to_string(),
            available: book.sheet_names().into_iter().map(str::to_string).collect(),
        })
}

/// Process `book` with `options` in one call.
///
/// # Errors
///
/// See [`Pipeline::new`] and [`Pipeline::run`].
pub fn process_book(book: &Book, options: PipelineOptions) -> DateResult<Processed> {
    Pipeline::new(options)?.run(book)
}
