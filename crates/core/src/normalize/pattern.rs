//! Date pattern rule table.
//!
//! A pattern is a token template such as `MMM DD, YYYY` compiled into a
//! token list. Parsing walks the tokens left to right over the input, each
//! token consuming greedily with no backtracking. A strict pattern accepts the
//! input only when every token matched and nothing is left over.

use crate::error::{DateError, DateResult};
use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;

/// Built-in patterns, tried in this order. Earlier entries win.
pub const DEFAULT_PATTERNS: [&str; 19] = [
    "MM-DD-YYYY",
    "DD-MM-YYYY",
    "DD-MMM-YYYY",
    "MMM-DD",
    "MMM DD, YYYY",
    "DD MMM YYYY",
    "MM/DD/YYYY",
    "YYYY-MM-DD",
    "MMMM DD, YYYY",
    "DD MMM",
    "MMM-YYYY",
    "MM-DD-YY",
    "M-D-YY",
    "M-D-YYYY",
    "MM-DD-YYYY HH:mm",
    "MMMM D, YYYY",
    "MM-DD-YYYY h:mm A",
    "MMMM D, YYYY h:mm A",
    "dddd, MMMM D, YYYY",
];

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS_LONG: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEKDAYS_SHORT: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Hour,
    Hour12,
    Minute,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameWidth {
    Short,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Digits. `padded` tokens need the full width when strict.
    Number { field: Field, padded: bool },
    /// Two-digit year (`YY`).
    ShortYear,
    MonthName(NameWidth),
    WeekdayName(NameWidth),
    Meridiem,
    Literal(String),
}

impl Token {
    fn from_template_piece(piece: &str) -> Token {
        match piece {
            "YYYY" => Token::Number { field: Field::Year, padded: true },
            "YY" => Token::ShortYear,
            "MMMM" => Token::MonthName(NameWidth::Long),
            "MMM" => Token::MonthName(NameWidth::Short),
            "MM" => Token::Number { field: Field::Month, padded: true },
            "M" => Token::Number { field: Field::Month, padded: false },
            "DD" => Token::Number { field: Field::Day, padded: true },
            "D" => Token::Number { field: Field::Day, padded: false },
            "dddd" => Token::WeekdayName(NameWidth::Long),
            "ddd" => Token::WeekdayName(NameWidth::Short),
            "HH" => Token::Number { field: Field::Hour, padded: true },
            "H" => Token::Number { field: Field::Hour, padded: false },
            "hh" => Token::Number { field: Field::Hour12, padded: true },
            "h" => Token::Number { field: Field::Hour12, padded: false },
            "mm" => Token::Number { field: Field::Minute, padded: true },
            "m" => Token::Number { field: Field::Minute, padded: false },
            "ss" => Token::Number { field: Field::Second, padded: true },
            "s" => Token::Number { field: Field::Second, padded: false },
            "A" | "a" => Token::Meridiem,
            escaped if escaped.len() >= 2 && escaped.starts_with('[') && escaped.ends_with(']') => {
                Token::Literal(escaped[1..escaped.len() - 1].to_string())
            }
            literal => Token::Literal(literal.to_string()),
        }
    }

    fn is_date_field(&self) -> bool {
        matches!(
            self,
            Token::Number {
                field: Field::Year | Field::Month | Field::Day,
                ..
            } | Token::ShortYear
                | Token::MonthName(_)
        )
    }
}

fn template_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\[[^\]]*\]|YYYY|YY|MMMM|MMM|MM|M|DD|D|dddd|ddd|HH|H|hh|h|mm|m|ss|s|A|a|.")
            .expect("valid regex")
    })
}

fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for piece in template_regex().find_iter(template) {
        match (Token::from_template_piece(piece.as_str()), tokens.last_mut()) {
            (Token::Literal(text), Some(Token::Literal(prev))) => prev.push_str(&text),
            (token, _) => tokens.push(token),
        }
    }
    tokens
}

/// Two-digit year rule: 00-68 → 2000s, 69-99 → 1900s.
fn expand_two_digit_year(yy: i32) -> i32 {
    if yy > 68 {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// Take between `min` and `max` leading ASCII digits.
fn take_digits(input: &str, min: usize, max: usize) -> Option<(u32, usize)> {
    let len = input
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    if len < min {
        return None;
    }
    input[..len].parse().ok().map(|value| (value, len))
}

/// Case-insensitive longest-prefix match against a name list.
/// Returns the index in `names` and the consumed length.
fn take_name(input: &str, names: &[&str]) -> Option<(usize, usize)> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            input
                .get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name))
        })
        .max_by_key(|(_, name)| name.len())
        .map(|(idx, name)| (idx, name.len()))
}

/// `[ap]\.?m?\.?`, case-insensitive.
fn take_meridiem(input: &str) -> Option<(bool, usize)> {
    let bytes = input.as_bytes();
    let is_pm = match bytes.first()?.to_ascii_lowercase() {
        b'a' => false,
        b'p' => true,
        _ => return None,
    };
    let mut len = 1;
    if bytes.get(len) == Some(&b'.') {
        len += 1;
    }
    if bytes.get(len).is_some_and(|b| b.eq_ignore_ascii_case(&b'm')) {
        len += 1;
    }
    if bytes.get(len) == Some(&b'.') {
        len += 1;
    }
    Some((is_pm, len))
}

/// Raw fields captured from the input before validation.
#[derive(Debug, Default)]
struct Captured {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    twelve_hour: bool,
    minute: Option<u32>,
    second: Option<u32>,
    is_pm: Option<bool>,
    weekday: Option<Weekday>,
}

impl Captured {
    /// Turn captured fields into a calendar date.
    ///
    /// Leading missing fields of (year, month, day) come from `reference`; once
    /// one is present, later missing ones default to 1.
    fn resolve(&self, reference: NaiveDate) -> Option<NaiveDate> {
        let (year, month, day) = match (self.year, self.month, self.day) {
            (None, None, None) => (reference.year(), reference.month(), reference.day()),
            (None, None, Some(d)) => (reference.year(), reference.month(), d),
            (None, Some(m), d) => (reference.year(), m, d.unwrap_or(1)),
            (Some(y), m, d) => (y, m.unwrap_or(1), d.unwrap_or(1)),
        };

        let mut hour = self.hour.unwrap_or(0);
        if self.twelve_hour && !(1..=12).contains(&hour) {
            return None;
        }
        match self.is_pm {
            Some(true) if hour < 12 => hour += 12,
            Some(false) if hour == 12 => hour = 0,
            _ => {}
        }
        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);
        if minute > 59 || second > 59 {
            return None;
        }

        let mut date = NaiveDate::from_ymd_opt(year, month, day)?;
        match hour {
            0..=23 => {}
            // 24:00 is the end of the day, i.e. the start of the next one
            24 if minute == 0 && second == 0 => date = date.succ_opt()?,
            _ => return None,
        }

        if let Some(weekday) = self.weekday {
            if date.weekday() != weekday {
                return None;
            }
        }
        Some(date)
    }
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    template: String,
    strict: bool,
    tokens: Vec<Token>,
}

impl DatePattern {
    fn from_template(template: &str, strict: bool) -> Self {
        Self {
            template: template.to_string(),
            strict,
            tokens: tokenize(template),
        }
    }

    /// Compile a user supplied template.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidPattern`] if the template is empty or has no
    /// year, month, or day token.
    pub fn compile(template: &str, strict: bool) -> DateResult<Self> {
        if template.trim().is_empty() {
            return Err(DateError::invalid_pattern(template, "pattern is empty"));
        }
        let pattern = Self::from_template(template, strict);
        if !pattern.tokens.iter().any(Token::is_date_field) {
            return Err(DateError::invalid_pattern(
                template,
                "pattern has no year, month, or day token",
            ));
        }
        Ok(pattern)
    }

    /// The template this pattern was compiled from
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parse `input`, filling missing fields from `reference`.
    #[must_use]
    pub fn parse(&self, input: &str, reference: NaiveDate) -> Option<NaiveDate> {
        let mut captured = Captured::default();
        let mut rest = input;

        for token in &self.tokens {
            let consumed = self.apply(token, rest, &mut captured)?;
            rest = &rest[consumed..];
        }

        if self.strict && !rest.is_empty() {
            return None;
        }
        captured.resolve(reference)
    }

    fn digit_widths(&self, field: Field, padded: bool) -> (usize, usize) {
        match (field, padded, self.strict) {
            (Field::Year, true, true) => (4, 4),
            (Field::Year, _, _) => (1, 4),
            (_, true, true) => (2, 2),
            _ => (1, 2),
        }
    }

    /// Match one token at the start of `input`; returns the bytes consumed.
    fn apply(&self, token: &Token, input: &str, captured: &mut Captured) -> Option<usize> {
        match token {
            Token::Literal(text) => input.starts_with(text.as_str()).then_some(text.len()),
            Token::Number { field, padded } => {
                let (min, max) = self.digit_widths(*field, *padded);
                let (value, len) = take_digits(input, min, max)?;
                match field {
                    Field::Year => {
                        let year = i32::try_from(value).ok()?;
                        captured.year = Some(if len == 2 {
                            expand_two_digit_year(year)
                        } else {
                            year
                        });
                    }
                    Field::Month => captured.month = Some(value),
                    Field::Day => captured.day = Some(value),
                    Field::Hour => captured.hour = Some(value),
                    Field::Hour12 => {
                        captured.hour = Some(value);
                        captured.twelve_hour = true;
                    }
                    Field::Minute => captured.minute = Some(value),
                    Field::Second => captured.second = Some(value),
                }
                Some(len)
            }
            Token::ShortYear => {
                let min = if self.strict { 2 } else { 1 };
                let (value, len) = take_digits(input, min, 2)?;
                captured.year = Some(expand_two_digit_year(i32::try_from(value).ok()?));
                Some(len)
            }
            Token::MonthName(width) => {
                let (idx, len) = match (width, self.strict) {
                    (NameWidth::Short, true) => take_name(input, &MONTHS_SHORT)?,
                    (NameWidth::Long, true) => take_name(input, &MONTHS_LONG)?,
                    (_, false) => {
                        let (idx, len) = take_name(input, &[MONTHS_LONG, MONTHS_SHORT].concat())?;
                        (idx % 12, len)
                    }
                };
                captured.month = Some(u32::try_from(idx).ok()? + 1);
                Some(len)
            }
            Token::WeekdayName(width) => {
                let (idx, len) = match (width, self.strict) {
                    (NameWidth::Short, true) => take_name(input, &WEEKDAYS_SHORT)?,
                    (NameWidth::Long, true) => take_name(input, &WEEKDAYS_LONG)?,
                    (_, false) => {
                        let (idx, len) =
                            take_name(input, &[WEEKDAYS_LONG, WEEKDAYS_SHORT].concat())?;
                        (idx % 7, len)
                    }
                };
                captured.weekday = Some(WEEKDAY_ORDER[idx]);
                Some(len)
            }
            Token::Meridiem => {
                let (is_pm, len) = take_meridiem(input)?;
                captured.is_pm = Some(is_pm);
                Some(len)
            }
        }
    }
}

/// Ordered list of patterns evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<DatePattern>,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternTable {
    /// The built-in patterns, all strict
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS
                .iter()
                .map(|template| DatePattern::from_template(template, true))
                .collect(),
        }
    }

    /// Append a pattern; it is tried after every existing one
    pub fn push(&mut self, pattern: DatePattern) {
        self.patterns.push(pattern);
    }

    /// Number of patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the table has no patterns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Get a pattern by position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DatePattern> {
        self.patterns.get(index)
    }

    /// Try every pattern in order; returns the index of the first that matches
    /// together with the parsed date.
    #[must_use]
    pub fn parse(&self, input: &str, reference: NaiveDate) -> Option<(usize, NaiveDate)> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(idx, pattern)| pattern.parse(input, reference).map(|date| (idx, date)))
    }
}
