//! Worked-hours arithmetic over wall-clock minute-of-day values.

use thiserror::Error;

pub const MINUTES_PER_DAY: i32 = 1440;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("clock value must be HH:MM, got {0:?}")]
    Malformed(String),

    #[error("clock value {0:?} is out of range")]
    OutOfRange(String),
}

/// Parse an "HH:MM" wall-clock value into a minute-of-day (0-1439).
pub fn parse_clock(value: &str) -> Result<i32, ClockError> {
    let (hours, minutes) = value
        .split_once(':')
        .ok_or_else(|| ClockError::Malformed(value.to_string()))?;

    let hours: i32 = hours
        .parse()
        .map_err(|_| ClockError::Malformed(value.to_string()))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| ClockError::Malformed(value.to_string()))?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(ClockError::OutOfRange(value.to_string()));
    }

    Ok(hours * 60 + minutes)
}

/// Render a minute-of-day back into "HH:MM".
pub fn format_clock(minute_of_day: i32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Derive the total worked hours for one entry, rounded to two decimals.
///
/// A `time_out` earlier than `time_in` means the shift ran over midnight and
/// ended on the following day; shifts never exceed 24 hours. The break is
/// deducted from the raw span and the result floors at zero.
pub fn total_hours(time_in: i32, time_out: i32, break_minutes: i32) -> f64 {
    let mut diff = time_out - time_in;
    if diff < 0 {
        diff += MINUTES_PER_DAY;
    }

    let net = (diff - break_minutes).max(0);

    ((net as f64 / 60.0) * 100.0).round() / 100.0
}
