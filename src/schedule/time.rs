//! Time-of-day values on a repeating 24-hour cycle.
//!
//! Every circular-time calculation in the crate goes through
//! [`TimeOfDay::minutes_until`], so midnight wraparound is handled in one place.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 1440;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid time \"{0}\", expected HH:mm")]
    Malformed(String),
    #[error("minute of day {0} is outside 0..1440")]
    OutOfRange(u32),
}

/// A minute-resolution time of day, always in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeError> {
        if minutes < MINUTES_PER_DAY as u32 {
            Ok(Self(minutes as u16))
        } else {
            Err(TimeError::OutOfRange(minutes))
        }
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        let total = hour
            .checked_mul(60)
            .and_then(|m| m.checked_add(minute))
            .ok_or(TimeError::OutOfRange(u32::MAX))?;
        if minute >= 60 {
            return Err(TimeError::OutOfRange(total));
        }
        Self::from_minutes(total)
    }

    /// Seconds are dropped.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Minutes from `self` forward to `later`, going round midnight if needed.
    /// Always in `[0, 1440)`.
    pub fn minutes_until(self, later: TimeOfDay) -> u16 {
        let diff = later.minutes() as i32 - self.minutes() as i32;
        diff.rem_euclid(MINUTES_PER_DAY as i32) as u16
    }

    pub fn plus_hours(self, hours: u16) -> Self {
        let total = self.0 as u32 + hours as u32 * 60;
        Self((total % MINUTES_PER_DAY as u32) as u16)
    }

    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour() as u32, self.minute() as u32, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Hour and AM/PM with no leading zero, e.g. "6AM", "12PM".
    pub fn hour_label(self) -> String {
        self.to_naive().format("%-I%p").to_string()
    }

    /// 12-hour clock text, e.g. "07:30 AM".
    pub fn clock_label(self) -> String {
        self.to_naive().format("%I:%M %p").to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self::from_naive)
            .map_err(|_| TimeError::Malformed(s.to_string()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Supplies the current time of day.
pub trait Clock {
    fn now(&self) -> TimeOfDay;
}

/// Wall clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeOfDay {
        TimeOfDay::from_naive(Local::now().time())
    }
}
