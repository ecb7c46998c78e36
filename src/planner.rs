use std::collections::BTreeSet;

use chrono::Weekday;
use log::debug;
use thiserror::Error;

use crate::availability::blocks::{Block, blocks};
use crate::availability::hour::Hour;
use crate::availability::model::{WeekSchedule, day_name};
use crate::availability::ranges::compress;
use crate::availability::selection::{EditSession, SelectOutcome};
use crate::grid::GridConfig;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Page {
    Weekly,
    Daily(Weekday),
    Edit(Weekday),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum PlannerError {
    #[error("no day is being edited")]
    NotEditing,
    #[error("{hour} is outside the visible grid ({first} to {last})")]
    OutsideGrid { hour: Hour, first: Hour, last: Hour },
}

/// Owns the week and the one edit session that may be open on it.
pub struct Planner {
    schedule: WeekSchedule,
    grid: GridConfig,
    page: Page,
    edit: Option<EditSession>,
}

impl Planner {
    pub fn new(schedule: WeekSchedule, grid: GridConfig) -> Self {
        Self {
            schedule,
            grid,
            page: Page::Weekly,
            edit: None,
        }
    }

    pub fn schedule(&self) -> &WeekSchedule {
        &self.schedule
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Opens a day from the weekly overview: days with bookings show their
    /// grid, free days go straight to the picker.
    pub fn open_day(&mut self, day: Weekday) -> Page {
        if self.schedule.is_free(day) {
            self.edit_day(day)
        } else {
            self.edit = None;
            self.page = Page::Daily(day);
            self.page
        }
    }

    pub fn edit_day(&mut self, day: Weekday) -> Page {
        debug!("editing {}", day_name(day));
        self.edit = Some(EditSession::new(day));
        self.page = Page::Edit(day);
        self.page
    }

    /// Leaves any page for the overview, dropping uncommitted picks.
    pub fn back_to_weekly(&mut self) {
        self.edit = None;
        self.page = Page::Weekly;
    }

    pub fn tap(&mut self, hour: Hour) -> Result<SelectOutcome, PlannerError> {
        if !self.grid.contains(hour) {
            return Err(PlannerError::OutsideGrid {
                hour,
                first: self.grid.first(),
                last: self.grid.last(),
            });
        }
        let session = self.edit.as_mut().ok_or(PlannerError::NotEditing)?;
        Ok(session.select_hour(&self.schedule, hour))
    }

    /// Commits the open session and returns to the overview. With nothing
    /// picked the call does nothing and the picker stays open.
    pub fn confirm(&mut self) -> Result<Option<BTreeSet<Hour>>, PlannerError> {
        let session = self.edit.as_mut().ok_or(PlannerError::NotEditing)?;
        let Some(merged) = session.commit(&mut self.schedule) else {
            return Ok(None);
        };
        self.back_to_weekly();
        Ok(Some(merged))
    }

    pub fn summary(&self, day: Weekday) -> String {
        compress(self.schedule.booked(day))
    }

    pub fn day_blocks(&self, day: Weekday) -> Vec<Block> {
        blocks(&self.grid.candidates(), self.schedule.booked(day))
    }
}
