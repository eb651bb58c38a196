//! Date value normalizer.
//!
//! Turns one raw cell from a date column into the canonical date text:
//! numbers are read as serial dates, text is tried against the pattern table,
//! and anything unrecognized is returned unchanged.

mod pattern;
mod serial;

pub use pattern::{DatePattern, PatternTable, DEFAULT_PATTERNS};
pub use serial::serial_to_date;

use crate::error::{DateError, DateResult};
use crate::options::{DateSystem, NormalizeOptions, SerialZone};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::Serialize;
use sheetdate_sheet::CellValue;
use std::fmt::Write;

/// What the normalizer did with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Empty cell, emitted as an empty string
    Empty,
    /// Number converted as a serial date
    Serial,
    /// Text matched the pattern at this table position
    Parsed { pattern: usize },
    /// Kept verbatim: text matching no pattern, or an out-of-range serial
    Unparsed,
    /// Not a number or text (booleans); left untouched
    Passthrough,
}

/// Per-outcome cell counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub empty: usize,
    pub serial: usize,
    pub parsed: usize,
    pub unparsed: usize,
    pub passthrough: usize,
}

impl NormalizeStats {
    /// Count one outcome
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Empty => self.empty += 1,
            Outcome::Serial => self.serial += 1,
            Outcome::Parsed { .. } => self.parsed += 1,
            Outcome::Unparsed => self.unparsed += 1,
            Outcome::Passthrough => self.passthrough += 1,
        }
    }

    /// Cells rewritten into the canonical format
    #[must_use]
    pub fn converted(&self) -> usize {
        self.serial + self.parsed
    }

    /// Total cells seen
    #[must_use]
    pub fn total(&self) -> usize {
        self.empty + self.serial + self.parsed + self.unparsed + self.passthrough
    }
}

/// Normalizer with its pattern table compiled and reference date fixed.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    table: PatternTable,
    date_system: DateSystem,
    zone: SerialZone,
    reference: NaiveDate,
    output_format: String,
}

impl DateNormalizer {
    /// Build a normalizer from options.
    ///
    /// # Errors
    ///
    /// Returns an error if the output format or an extra pattern is invalid.
    pub fn new(options: &NormalizeOptions) -> DateResult<Self> {
        validate_output_format(&options.output_format)?;

        let mut table = PatternTable::builtin();
        for template in &options.extra_patterns {
            table.push(DatePattern::compile(template, true)?);
        }

        Ok(Self {
            table,
            date_system: options.date_system.unwrap_or_default(),
            zone: options.zone,
            reference: options.resolve_reference_date(),
            output_format: options.output_format.clone(),
        })
    }

    /// Same normalizer reading serials in `date_system`
    #[must_use]
    pub fn with_date_system(mut self, date_system: DateSystem) -> Self {
        self.date_system = date_system;
        self
    }

    /// The pattern table in evaluation order
    #[must_use]
    pub fn patterns(&self) -> &PatternTable {
        &self.table
    }

    /// Date used for fields a pattern does not carry
    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    /// Normalize one cell.
    #[must_use]
    pub fn normalize(&self, cell: &CellValue) -> CellValue {
        self.normalize_with_outcome(cell).0
    }

    /// Normalize one cell and report what happened.
    #[must_use]
    pub fn normalize_with_outcome(&self, cell: &CellValue) -> (CellValue, Outcome) {
        match cell {
            CellValue::Empty => (CellValue::Text(String::new()), Outcome::Empty),
            CellValue::Number(serial) => {
                match serial_to_date(*serial, self.date_system, &self.zone)
                    .and_then(|date| self.format(date))
                {
                    Some(text) => (CellValue::Text(text), Outcome::Serial),
                    None => (cell.clone(), Outcome::Unparsed),
                }
            }
            CellValue::Text(text) => {
                let parsed = self.table.parse(text, self.reference).and_then(|(pattern, date)| {
                    self.format(date).map(|formatted| (pattern, formatted))
                });
                match parsed {
                    Some((pattern, formatted)) => {
                        tracing::trace!(
                            "'{}' matched {}",
                            text,
                            self.table.get(pattern).map_or("?", DatePattern::template)
                        );
                        (CellValue::Text(formatted), Outcome::Parsed { pattern })
                    }
                    None => (cell.clone(), Outcome::Unparsed),
                }
            }
            CellValue::Bool(_) => (cell.clone(), Outcome::Passthrough),
        }
    }

    fn format(&self, date: NaiveDate) -> Option<String> {
        format_date(date, &self.output_format)
    }
}

/// Render `date` with a strftime format. `None` when the format needs fields
/// a calendar date does not have (time of day, offset).
fn format_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

fn validate_output_format(format: &str) -> DateResult<()> {
    if format.is_empty() {
        return Err(DateError::InvalidOutputFormat("format is empty".to_string()));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DateError::InvalidOutputFormat(format.to_string()));
    }
    if format_date(NaiveDate::default(), format).is_none() {
        return Err(DateError::InvalidOutputFormat(format!(
            "{format} (only date fields can be rendered)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> DateNormalizer {
        let options = NormalizeOptions::default()
            .with_zone(SerialZone::Utc)
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        DateNormalizer::new(&options).unwrap()
    }

    #[test]
    fn test_empty_becomes_empty_text() {
        let (cell, outcome) = normalizer().normalize_with_outcome(&CellValue::Empty);
        assert_eq!(cell, CellValue::text(""));
        assert_eq!(outcome, Outcome::Empty);
    }

    #[test]
    fn test_serial_numbers() {
        let n = normalizer();
        assert_eq!(n.normalize(&CellValue::Number(44197.0)), CellValue::text("01/01/2021"));
        assert_eq!(n.normalize(&CellValue::Number(44197.75)), CellValue::text("01/01/2021"));
        assert_eq!(n.normalize(&CellValue::Number(1.0)), CellValue::text("12/31/1899"));
    }

    #[test]
    fn test_1904_serials() {
        let n = normalizer().with_date_system(DateSystem::Excel1904);
        assert_eq!(n.normalize(&CellValue::Number(0.0)), CellValue::text("01/01/1904"));
        assert_eq!(
            n.normalize(&CellValue::Number(44197.0 - 1462.0)),
            CellValue::text("01/01/2021")
        );
    }

    #[test]
    fn test_unconvertible_serial_kept() {
        let (cell, outcome) = normalizer().normalize_with_outcome(&CellValue::Number(1e300));
        assert_eq!(cell, CellValue::Number(1e300));
        assert_eq!(outcome, Outcome::Unparsed);
    }

    #[test]
    fn test_text_dates() {
        let n = normalizer();
        assert_eq!(n.normalize(&CellValue::text("March 3, 2020")), CellValue::text("03/03/2020"));
        assert_eq!(n.normalize(&CellValue::text("2021-07-04")), CellValue::text("07/04/2021"));
        assert_eq!(
            n.normalize(&CellValue::text("03-15-2021 4:45 PM")),
            CellValue::text("03/15/2021")
        );
        assert_eq!(n.normalize(&CellValue::text("Mar-03")), CellValue::text("03/03/2024"));
    }

    #[test]
    fn test_canonical_text_is_idempotent() {
        let n = normalizer();
        for text in ["01/02/2020", "12/31/1999", "02/29/2024"] {
            let once = n.normalize(&CellValue::text(text));
            assert_eq!(once, CellValue::text(text));
            assert_eq!(n.normalize(&once), once);
        }
    }

    #[test]
    fn test_precedence_is_stable() {
        let n = normalizer();
        let (first, outcome) = n.normalize_with_outcome(&CellValue::text("01-02-2020"));
        assert_eq!(first, CellValue::text("01/02/2020"));
        assert_eq!(outcome, Outcome::Parsed { pattern: 0 });
        for _ in 0..10 {
            assert_eq!(n.normalize(&CellValue::text("01-02-2020")), first);
        }
    }

    #[test]
    fn test_unparseable_text_preserved() {
        let (cell, outcome) = normalizer().normalize_with_outcome(&CellValue::text("not a date"));
        assert_eq!(cell, CellValue::text("not a date"));
        assert_eq!(outcome, Outcome::Unparsed);
    }

    #[test]
    fn test_bool_passthrough() {
        let (cell, outcome) = normalizer().normalize_with_outcome(&CellValue::Bool(true));
        assert_eq!(cell, CellValue::Bool(true));
        assert_eq!(outcome, Outcome::Passthrough);
    }

    #[test]
    fn test_extra_patterns_tried_last() {
        let options = NormalizeOptions::default()
            .with_zone(SerialZone::Utc)
            .with_pattern("DD.MM.YYYY")
            .with_pattern("MM-DD-YYYY");
        let n = DateNormalizer::new(&options).unwrap();

        assert_eq!(n.patterns().len(), DEFAULT_PATTERNS.len() + 2);
        assert_eq!(n.normalize(&CellValue::text("13.02.2020")), CellValue::text("02/13/2020"));
        let (_, outcome) = n.normalize_with_outcome(&CellValue::text("01-02-2020"));
        assert_eq!(outcome, Outcome::Parsed { pattern: 0 });
    }

    #[test]
    fn test_custom_output_format() {
        let options = NormalizeOptions::default()
            .with_zone(SerialZone::Utc)
            .with_output_format("%Y-%m-%d");
        let n = DateNormalizer::new(&options).unwrap();
        assert_eq!(n.normalize(&CellValue::Number(44197.0)), CellValue::text("2021-01-01"));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let bad_format = NormalizeOptions::default().with_output_format("%Q");
        assert!(matches!(
            DateNormalizer::new(&bad_format),
            Err(DateError::InvalidOutputFormat(_))
        ));

        for time_format in ["%H:%M", "%m/%d/%Y %H:%M", "%Y-%m-%d %z"] {
            let options = NormalizeOptions::default().with_output_format(time_format);
            assert!(matches!(
                DateNormalizer::new(&options),
                Err(DateError::InvalidOutputFormat(_))
            ));
        }

        let bad_pattern = NormalizeOptions::default().with_pattern("hh:mm");
        assert!(matches!(
            DateNormalizer::new(&bad_pattern),
            Err(DateError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_stats() {
        let mut stats = NormalizeStats::default();
        stats.record(Outcome::Serial);
        stats.record(Outcome::Parsed { pattern: 3 });
        stats.record(Outcome::Unparsed);
        stats.record(Outcome::Empty);

        assert_eq!(stats.converted(), 2);
        assert_eq!(stats.total(), 4);
    }
}
