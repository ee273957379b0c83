//! Departure-time buckets for congestion lookup.
//!
//! Congestion tables are keyed by day type (weekday / Saturday / Sunday)
//! and a half-hour slot of the day, labelled `t_{minutes}` in source data
//! (`t_480` is 08:00–08:29). This module extracts both from an epoch
//! departure timestamp, interpreted in UTC so results never depend on the
//! host timezone.

use std::fmt;

use chrono::{DateTime, Datelike, Timelike};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid time-slot label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time slot: {reason}")]
pub struct InvalidTimeSlot {
    reason: &'static str,
}

/// Day category used by congestion tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Sat,
    Sun,
}

impl DayType {
    /// Day type of an epoch-seconds timestamp.
    ///
    /// Timestamps with a fractional part are truncated. Pre-epoch values
    /// are clamped to the epoch itself.
    pub fn from_epoch_seconds(ts: f64) -> Self {
        let dt = datetime_at(ts);
        match dt.weekday().num_days_from_monday() {
            0..=4 => DayType::Weekday,
            5 => DayType::Sat,
            _ => DayType::Sun,
        }
    }

    /// Parse the source-data string form; anything unknown is a weekday.
    pub fn parse(s: &str) -> Self {
        match s {
            "sat" => DayType::Sat,
            "sun" => DayType::Sun,
            _ => DayType::Weekday,
        }
    }

    /// Returns the source-data string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Sat => "sat",
            DayType::Sun => "sun",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-hour slot of the day, stored as minutes since midnight floored
/// to 30 (so always one of 0, 30, 60, …, 1410).
///
/// # Examples
///
/// ```
/// use access_router::domain::TimeSlot;
///
/// let slot = TimeSlot::parse("t_480").unwrap();
/// assert_eq!(slot.minutes(), 480);
/// assert_eq!(slot.to_string(), "t_480");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(u16);

impl TimeSlot {
    /// Slot containing the given epoch-seconds instant.
    pub fn from_epoch_seconds(ts: f64) -> Self {
        let dt = datetime_at(ts);
        let minutes = (dt.hour() * 60 + dt.minute()) as u16;
        TimeSlot(minutes / 30 * 30)
    }

    /// Slot for a raw minutes-since-midnight value (floored to 30).
    pub fn from_minutes(minutes: u16) -> Result<Self, InvalidTimeSlot> {
        if minutes >= 1440 {
            return Err(InvalidTimeSlot {
                reason: "minutes must be below 1440",
            });
        }
        Ok(TimeSlot(minutes / 30 * 30))
    }

    /// Parse a `t_{minutes}` label.
    ///
    /// The minutes must name a slot boundary exactly: `t_480` is valid,
    /// `t_485` is not.
    pub fn parse(s: &str) -> Result<Self, InvalidTimeSlot> {
        let digits = s.strip_prefix("t_").ok_or(InvalidTimeSlot {
            reason: "expected t_ prefix",
        })?;
        if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTimeSlot {
                reason: "expected decimal minutes after t_",
            });
        }
        let minutes: u16 = digits.parse().map_err(|_| InvalidTimeSlot {
            reason: "minutes out of range",
        })?;
        if minutes >= 1440 {
            return Err(InvalidTimeSlot {
                reason: "minutes must be below 1440",
            });
        }
        if minutes % 30 != 0 {
            return Err(InvalidTimeSlot {
                reason: "minutes must be a multiple of 30",
            });
        }
        Ok(TimeSlot(minutes))
    }

    /// Minutes since midnight at the start of the slot.
    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t_{}", self.0)
    }
}

fn datetime_at(ts: f64) -> DateTime<chrono::Utc> {
    DateTime::from_timestamp(ts.max(0.0) as i64, 0).unwrap_or_else(|| DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn epoch(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> f64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
            .and_utc()
            .timestamp() as f64
    }

    #[test]
    fn day_type_by_weekday() {
        // 2024-03-15 is a Friday, 16th Saturday, 17th Sunday.
        assert_eq!(
            DayType::from_epoch_seconds(epoch(2024, 3, 15, 9, 0)),
            DayType::Weekday
        );
        assert_eq!(
            DayType::from_epoch_seconds(epoch(2024, 3, 16, 9, 0)),
            DayType::Sat
        );
        assert_eq!(
            DayType::from_epoch_seconds(epoch(2024, 3, 17, 9, 0)),
            DayType::Sun
        );
    }

    #[test]
    fn day_type_string_roundtrip() {
        for day in [DayType::Weekday, DayType::Sat, DayType::Sun] {
            assert_eq!(DayType::parse(day.as_str()), day);
        }
        assert_eq!(DayType::parse("holiday"), DayType::Weekday);
    }

    #[test]
    fn slot_floors_to_half_hour() {
        assert_eq!(
            TimeSlot::from_epoch_seconds(epoch(2024, 3, 15, 8, 0)).minutes(),
            480
        );
        assert_eq!(
            TimeSlot::from_epoch_seconds(epoch(2024, 3, 15, 8, 29)).minutes(),
            480
        );
        assert_eq!(
            TimeSlot::from_epoch_seconds(epoch(2024, 3, 15, 8, 30)).minutes(),
            510
        );
        assert_eq!(
            TimeSlot::from_epoch_seconds(epoch(2024, 3, 15, 0, 0)).minutes(),
            0
        );
        assert_eq!(
            TimeSlot::from_epoch_seconds(epoch(2024, 3, 15, 23, 59)).minutes(),
            1410
        );
    }

    #[test]
    fn parse_valid_labels() {
        assert_eq!(TimeSlot::parse("t_0").unwrap().minutes(), 0);
        assert_eq!(TimeSlot::parse("t_480").unwrap().minutes(), 480);
        assert_eq!(TimeSlot::parse("t_1410").unwrap().minutes(), 1410);
    }

    #[test]
    fn parse_invalid_labels() {
        assert!(TimeSlot::parse("480").is_err());
        assert!(TimeSlot::parse("t_").is_err());
        assert!(TimeSlot::parse("t_485").is_err());
        assert!(TimeSlot::parse("t_1440").is_err());
        assert!(TimeSlot::parse("t_abc").is_err());
        assert!(TimeSlot::parse("t_99999").is_err());
    }

    #[test]
    fn display_matches_source_form() {
        assert_eq!(TimeSlot::parse("t_510").unwrap().to_string(), "t_510");
    }

    #[test]
    fn pre_epoch_clamps() {
        // Must not panic; clamped to the epoch (a Thursday).
        assert_eq!(DayType::from_epoch_seconds(-1.0), DayType::Weekday);
    }

    #[test]
    fn fractional_seconds_truncate() {
        let base = epoch(2024, 3, 15, 8, 29);
        assert_eq!(TimeSlot::from_epoch_seconds(base + 0.9).minutes(), 480);
    }

    #[test]
    fn utc_interpretation() {
        let ts = Utc::now().timestamp();
        // Smoke check: conversion is total for present-day values.
        let _ = DayType::from_epoch_seconds(ts as f64);
    }
}
