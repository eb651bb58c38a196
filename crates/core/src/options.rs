//! Option structs for the locate → materialize → normalize pipeline.

use crate::error::{DateError, DateResult};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use std::str::FromStr;

/// Sheet selected when no other name is configured.
pub const DEFAULT_SHEET_NAME: &str = "user details";

/// Header keyword matched case-insensitively as a substring.
pub const DEFAULT_KEYWORD: &str = "date";

/// Canonical `MM/DD/YYYY` output.
pub const DEFAULT_OUTPUT_FORMAT: &str = "%m/%d/%Y";

/// Spreadsheet serial date convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateSystem {
    /// Serial 25569 is 1970-01-01 (leap-year quirk already folded in).
    #[default]
    Excel1900,
    /// Serial 0 is 1904-01-01.
    Excel1904,
}

impl DateSystem {
    /// Serial value of 1970-01-01 in this system.
    #[must_use]
    pub fn unix_epoch_serial(self) -> i64 {
        match self {
            DateSystem::Excel1900 => 25_569,
            DateSystem::Excel1904 => 24_107,
        }
    }
}

impl FromStr for DateSystem {
    type Err = DateError;

    fn from_str(s: &str) -> DateResult<Self> {
        match s.trim() {
            "1900" => Ok(DateSystem::Excel1900),
            "1904" => Ok(DateSystem::Excel1904),
            other => Err(DateError::Config(format!(
                "unknown date system '{other}' (expected 1900 or 1904)"
            ))),
        }
    }
}

/// Zone in which serial instants are turned into calendar dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SerialZone {
    /// The host's local timezone.
    #[default]
    Local,
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl SerialZone {
    /// Calendar date of a UTC instant in this zone.
    #[must_use]
    pub fn date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            SerialZone::Local => instant.with_timezone(&Local).date_naive(),
            SerialZone::Utc => instant.date_naive(),
            SerialZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// Today's date in this zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.date_of(&Utc::now())
    }
}

impl FromStr for SerialZone {
    type Err = DateError;

    /// Accepts `local`, `utc`/`z`, or an offset like `+05:30`, `-0800`, `+02`.
    fn from_str(s: &str) -> DateResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(SerialZone::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("z") {
            return Ok(SerialZone::Utc);
        }
        parse_offset(s)
            .map(SerialZone::Fixed)
            .ok_or_else(|| DateError::Config(format!("invalid timezone '{s}'")))
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Options for locating the header row.
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Substring that marks a header cell as a date column
    pub keyword: String,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
        }
    }
}

impl LocatorOptions {
    /// Set the header keyword
    #[must_use]
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.keyword = keyword.to_string();
        self
    }
}

/// Options for the date value normalizer.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Serial date convention for numeric cells; follows the workbook when unset
    pub date_system: Option<DateSystem>,
    /// Zone used to turn serial instants into dates
    pub zone: SerialZone,
    /// Date used to fill a missing year (or month/day); today in `zone` when unset
    pub reference_date: Option<NaiveDate>,
    /// strftime format of the canonical output
    pub output_format: String,
    /// Extra strict patterns tried after the built-in ones
    pub extra_patterns: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            date_system: None,
            zone: SerialZone::default(),
            reference_date: None,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            extra_patterns: Vec::new(),
        }
    }
}

impl NormalizeOptions {
    /// Force a serial date system regardless of the workbook
    #[must_use]
    pub fn with_date_system(mut self, date_system: DateSystem) -> Self {
        self.date_system = Some(date_system);
        self
    }

    /// Set the zone for serial dates
    #[must_use]
    pub fn with_zone(mut self, zone: SerialZone) -> Self {
        self.zone = zone;
        self
    }

    /// Pin the reference date instead of using today
    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_output_format(mut self, format: &str) -> Self {
        self.output_format = format.to_string();
        self
    }

    /// Append a strict pattern after the built-in ones
    #[must_use]
    pub fn with_pattern(mut self, template: &str) -> Self {
        self.extra_patterns.push(template.to_string());
        self
    }

    /// Reference date for missing fields.
    #[must_use]
    pub fn resolve_reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| self.zone.today())
    }
}

/// Options for a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Sheet to process, compared case-insensitively
    pub sheet_name: String,
    pub locator: LocatorOptions,
    pub normalize: NormalizeOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            locator: LocatorOptions::default(),
            normalize: NormalizeOptions::default(),
        }
    }
}

impl PipelineOptions {
    /// Set the sheet name
    #[must_use]
    pub fn with_sheet_name(mut self, name: &str) -> Self {
        self.sheet_name = name.to_string();
        self
    }

    /// Set the locator options
    #[must_use]
    pub fn with_locator(mut self, locator: LocatorOptions) -> Self {
        self.locator = locator;
        self
    }

    /// Set the normalizer options
    #[must_use]
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }
}
