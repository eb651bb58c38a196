//! Spreadsheet serial dates.

use crate::options::{DateSystem, SerialZone};
use chrono::{DateTime, NaiveDate};

const SECONDS_PER_DAY: i64 = 86_400;

/// Convert a serial date to a calendar date.
///
/// The fractional (time of day) part is dropped before conversion; the whole
/// days since the Unix epoch are turned into an instant and read back as a
/// date in `zone`. Returns `None` for non-finite or out-of-range serials.
#[must_use]
pub fn serial_to_date(serial: f64, system: DateSystem, zone: &SerialZone) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let whole_days = serial.floor();
    if whole_days.abs() > i64::MAX as f64 / SECONDS_PER_DAY as f64 {
        return None;
    }

    let unix_days = (whole_days as i64).checked_sub(system.unix_epoch_serial())?;
    let unix_seconds = unix_days.checked_mul(SECONDS_PER_DAY)?;
    let instant = DateTime::from_timestamp(unix_seconds, 0)?;

    Some(zone.date_of(&instant))
}
