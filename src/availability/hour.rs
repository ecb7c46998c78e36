use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Exclusive end marker for a range that runs through midnight.
pub const END_OF_DAY: u8 = 24;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum HourError {
    #[error("hour {0} is out of range; expected 0..=23")]
    OutOfRange(u8),
    #[error("invalid hour '{0}', expected an integer between 0 and 23")]
    NotANumber(String),
}

/// A bookable one-hour slot, identified by the hour it starts at (0..=23).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Hour(u8);

impl Hour {
    pub const MIN: Hour = Hour(0);
    pub const MAX: Hour = Hour(END_OF_DAY - 1);

    pub fn new(value: u8) -> Result<Self, HourError> {
        if value >= END_OF_DAY {
            return Err(HourError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The following slot, if the day has one.
    pub fn succ(self) -> Option<Hour> {
        Hour::new(self.0 + 1).ok()
    }

    pub fn label(self) -> String {
        format_display(self.0)
    }

    /// Label for the top of the hour after this slot, i.e. where a booking
    /// that covers this slot ends.
    pub fn end_label(self) -> String {
        format_display(self.0 + 1)
    }

    /// Every slot between `lo` and `hi`, both included.
    pub fn span(lo: Hour, hi: Hour) -> impl Iterator<Item = Hour> {
        (lo.0..=hi.0).map(Hour)
    }
}

impl TryFrom<u8> for Hour {
    type Error = HourError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Hour::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

impl FromStr for Hour {
    type Err = HourError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let value = input
            .trim()
            .parse::<u8>()
            .map_err(|_| HourError::NotANumber(input.to_string()))?;
        Hour::new(value)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Formats a boundary hour in `0..=24` on a 12-hour clock.
///
/// 24 is the exclusive end of a booking that runs through midnight and reads
/// "12 AM". 0 keeps its literal value so a range starting at midnight can be
/// told apart from one ending there.
pub fn format_display(hour: u8) -> String {
    if hour == END_OF_DAY {
        return "12 AM".to_string();
    }
    if hour == 12 {
        return "12 PM".to_string();
    }
    if hour > 12 {
        return format!("{} PM", hour - 12);
    }
    format!("{hour} AM")
}
