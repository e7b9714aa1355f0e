//! Wall-clock time parsing for catalog start/end times

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CoursecastError, Result};

/// A wall-clock time of day, stored as minutes since midnight.
///
/// The canonical numeric form for time features: [`ClockTime::fractional_hours`]
/// feeds the duration feature, and the `Ord` impl lets start times serve as
/// categorical bucket keys in a
/// [`CategoryTable`](crate::features::CategoryTable).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClockTime {
    minutes: u32,
}

impl ClockTime {
    /// Parse a 12-hour catalog time string, case-insensitive meridiem.
    ///
    /// Accepts the formats the source catalogs print: `8:30am`, `08:30AM`,
    /// and the hour-only `8am`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, "%I:%M%p") {
            return Ok(Self::from_naive(time));
        }

        // Hour-only form: chrono insists on minutes, so supply them.
        if trimmed.is_ascii() && trimmed.len() > 2 {
            let (hour, meridiem) = trimmed.split_at(trimmed.len() - 2);
            if !hour.is_empty() && hour.bytes().all(|b| b.is_ascii_digit()) {
                let padded = format!("{hour}:00{meridiem}");
                if let Ok(time) = NaiveTime::parse_from_str(&padded, "%I:%M%p") {
                    return Ok(Self::from_naive(time));
                }
            }
        }

        Err(CoursecastError::DataError(format!(
            "unparseable clock time: {raw:?}"
        )))
    }

    fn from_naive(time: NaiveTime) -> Self {
        Self {
            minutes: time.hour() * 60 + time.minute(),
        }
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.minutes
    }

    /// Hours since midnight, fractional. `"8:30am"` is 8.5.
    pub fn fractional_hours(&self) -> f64 {
        f64::from(self.minutes) / 60.0
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hour = self.minutes / 60;
        let minute = self.minutes % 60;
        let (hour12, meridiem) = match hour {
            0 => (12, "am"),
            1..=11 => (hour, "am"),
            12 => (12, "pm"),
            _ => (hour - 12, "pm"),
        };
        write!(f, "{}:{:02}{}", hour12, minute, meridiem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_formats() {
        assert_eq!(ClockTime::parse("8:30am").unwrap().minutes_since_midnight(), 510);
        assert_eq!(ClockTime::parse("08:30AM").unwrap().minutes_since_midnight(), 510);
        assert_eq!(ClockTime::parse("12:00pm").unwrap().minutes_since_midnight(), 720);
        assert_eq!(ClockTime::parse("12:00am").unwrap().minutes_since_midnight(), 0);
        assert_eq!(ClockTime::parse("8am").unwrap().minutes_since_midnight(), 480);
        assert_eq!(ClockTime::parse(" 1:05pm ").unwrap().minutes_since_midnight(), 785);
    }

    #[test]
    fn test_parse_rejects_nonsense() {
        assert!(ClockTime::parse("n/a").is_err());
        assert!(ClockTime::parse("sometime").is_err());
        assert!(ClockTime::parse("8:61am").is_err());
        assert!(ClockTime::parse("25:00pm").is_err());
        assert!(ClockTime::parse("").is_err());
    }

    #[test]
    fn test_fractional_hours() {
        let t = ClockTime::parse("8:30am").unwrap();
        assert!((t.fractional_hours() - 8.5).abs() < 1e-12);

        let t = ClockTime::parse("1:15pm").unwrap();
        assert!((t.fractional_hours() - 13.25).abs() < 1e-12);
    }

    #[test]
    fn test_ordering_follows_the_clock() {
        let morning = ClockTime::parse("8:30am").unwrap();
        let noon = ClockTime::parse("12:00pm").unwrap();
        let afternoon = ClockTime::parse("1:00pm").unwrap();
        assert!(morning < noon);
        assert!(noon < afternoon);
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["8:30am", "12:00pm", "12:00am", "3:05pm"] {
            let t = ClockTime::parse(raw).unwrap();
            assert_eq!(t.to_string(), raw);
        }
    }
}
