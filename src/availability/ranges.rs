use std::collections::BTreeSet;
use std::fmt;

use crate::availability::hour::{Hour, format_display};

/// A maximal run of booked hours. `end` is exclusive: a run covering 9 AM and
/// 10 AM ends at 11 AM.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HourRange {
    pub start: Hour,
    pub last: Hour,
}

impl HourRange {
    pub fn end(&self) -> u8 {
        self.last.value() + 1
    }

    pub fn hour_count(&self) -> usize {
        usize::from(self.last.value() - self.start.value()) + 1
    }

    pub fn contains(&self, hour: Hour) -> bool {
        self.start <= hour && hour <= self.last
    }
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start.label(), format_display(self.end()))
    }
}

pub fn compress_ranges(hours: &BTreeSet<Hour>) -> Vec<HourRange> {
    let mut ranges = Vec::new();
    let mut iter = hours.iter().copied().peekable();
    let Some(mut range_start) = iter.peek().copied() else {
        return ranges;
    };

    while let Some(current) = iter.next() {
        let next = iter.peek().copied();
        if next.is_none() || next != current.succ() {
            ranges.push(HourRange {
                start: range_start,
                last: current,
            });
            if let Some(next) = next {
                range_start = next;
            }
        }
    }
    ranges
}

/// Human-readable summary of a day, e.g. "6 AM to 10 AM, 5 PM to 8 PM".
pub fn compress(hours: &BTreeSet<Hour>) -> String {
    compress_ranges(hours)
        .iter()
        .map(HourRange::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
