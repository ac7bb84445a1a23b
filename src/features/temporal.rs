//! Temporal analyzers over the creation timestamp.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::{Result, TweetvecError};

/// Coarse part of the day a tweet was posted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPeriod {
    EarlyMorning = 0,
    Morning = 1,
    Midday = 2,
    Afternoon = 3,
    Evening = 4,
    Night = 5,
    Midnight = 6,
}

impl DayPeriod {
    /// Bucket an hour of the day; each upper bound is inclusive.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=3 => DayPeriod::Midnight,
            4..=6 => DayPeriod::EarlyMorning,
            7..=11 => DayPeriod::Morning,
            12..=14 => DayPeriod::Midday,
            15..=17 => DayPeriod::Afternoon,
            18..=20 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Parse a timestamp with the given `strftime`-style format.
pub fn parse_timestamp(value: &str, format: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), format).map_err(|e| {
        TweetvecError::parse(format!(
            "invalid timestamp '{value}' for format '{format}': {e}"
        ))
    })
}

/// Period-of-day bucket index of a timestamp.
pub fn period_of_day(value: &str, format: &str) -> Result<f64> {
    let timestamp = parse_timestamp(value, format)?;
    Ok(DayPeriod::from_hour(timestamp.hour()).index() as f64)
}

/// Weekday index of a timestamp, 0 = Monday.
pub fn day_of_week(value: &str, format: &str) -> Result<f64> {
    let timestamp = parse_timestamp(value, format)?;
    Ok(timestamp.weekday().num_days_from_monday() as f64)
}
