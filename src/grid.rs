use thiserror::Error;

use crate::availability::hour::{Hour, HourError};

pub const DEFAULT_FIRST_HOUR: u8 = 6;
pub const DEFAULT_LAST_HOUR: u8 = 22;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("grid bound is invalid: {0}")]
    Bound(#[from] HourError),
    #[error("first grid hour {first} comes after last grid hour {last}")]
    Inverted { first: u8, last: u8 },
}

/// The hours shown as rows of the day picker, first and last included.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridConfig {
    first: Hour,
    last: Hour,
}

impl GridConfig {
    pub fn new(first: u8, last: u8) -> Result<Self, GridError> {
        let first = Hour::new(first)?;
        let last = Hour::new(last)?;
        if first > last {
            return Err(GridError::Inverted {
                first: first.value(),
                last: last.value(),
            });
        }
        Ok(Self { first, last })
    }

    pub fn first(&self) -> Hour {
        self.first
    }

    pub fn last(&self) -> Hour {
        self.last
    }

    pub fn candidates(&self) -> Vec<Hour> {
        Hour::span(self.first, self.last).collect()
    }

    pub fn contains(&self, hour: Hour) -> bool {
        self.first <= hour && hour <= self.last
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            first: Hour::new(DEFAULT_FIRST_HOUR).unwrap_or(Hour::MIN),
            last: Hour::new(DEFAULT_LAST_HOUR).unwrap_or(Hour::MAX),
        }
    }
}
