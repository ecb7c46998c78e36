use std::collections::BTreeSet;

use chrono::Weekday;
use log::debug;

use crate::availability::hour::Hour;
use crate::availability::model::{WeekSchedule, day_name};

/// Where a two-tap range gesture stands.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum RangeAnchor {
    #[default]
    Idle,
    Anchored(Hour),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SelectOutcome {
    /// The hour is already booked and cannot be picked.
    Booked,
    Deselected,
    Anchored,
    RangeFilled { added: usize },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SlotState {
    Booked,
    Pending,
    Free,
}

/// Hours picked for one day that have not been committed yet.
#[derive(Debug, Clone)]
pub struct EditSession {
    day: Weekday,
    pending: BTreeSet<Hour>,
    anchor: RangeAnchor,
}

impl EditSession {
    pub fn new(day: Weekday) -> Self {
        Self {
            day,
            pending: BTreeSet::new(),
            anchor: RangeAnchor::Idle,
        }
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn pending(&self) -> &BTreeSet<Hour> {
        &self.pending
    }

    pub fn anchor(&self) -> RangeAnchor {
        self.anchor
    }

    pub fn can_commit(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn select_hour(&mut self, schedule: &WeekSchedule, hour: Hour) -> SelectOutcome {
        let booked = schedule.booked(self.day);
        if booked.contains(&hour) {
            return SelectOutcome::Booked;
        }

        if self.pending.remove(&hour) {
            // Without its endpoint the half-finished range has nothing to grow from.
            if self.anchor == RangeAnchor::Anchored(hour) {
                self.anchor = RangeAnchor::Idle;
            }
            debug!("{}: deselected {hour}", day_name(self.day));
            return SelectOutcome::Deselected;
        }

        match self.anchor {
            RangeAnchor::Idle => {
                self.pending.insert(hour);
                self.anchor = RangeAnchor::Anchored(hour);
                debug!("{}: anchored range at {hour}", day_name(self.day));
                SelectOutcome::Anchored
            }
            RangeAnchor::Anchored(start) => {
                let lo = start.min(hour);
                let hi = start.max(hour);
                let mut added = 0;
                for candidate in Hour::span(lo, hi) {
                    if !booked.contains(&candidate) && self.pending.insert(candidate) {
                        added += 1;
                    }
                }
                self.anchor = RangeAnchor::Idle;
                debug!(
                    "{}: filled {lo} to {hi}, {added} new hour(s)",
                    day_name(self.day)
                );
                SelectOutcome::RangeFilled { added }
            }
        }
    }

    /// Merges the pending hours into the schedule and starts over. Returns the
    /// day's new booked set, or `None` when there is nothing to commit.
    pub fn commit(&mut self, schedule: &mut WeekSchedule) -> Option<BTreeSet<Hour>> {
        if !self.can_commit() {
            return None;
        }
        let merged = schedule.commit_merge(self.day, &self.pending);
        self.cancel();
        Some(merged)
    }

    pub fn cancel(&mut self) {
        self.pending.clear();
        self.anchor = RangeAnchor::Idle;
    }

    pub fn slot_state(&self, schedule: &WeekSchedule, hour: Hour) -> SlotState {
        if schedule.is_booked(self.day, hour) {
            SlotState::Booked
        } else if self.pending.contains(&hour) {
            SlotState::Pending
        } else {
            SlotState::Free
        }
    }

    pub fn hint(&self) -> &'static str {
        match self.anchor {
            RangeAnchor::Anchored(_) => "Tap another hour to select a range.",
            RangeAnchor::Idle => "Tap an hour or tap and drag to select a range.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(value: u8) -> Hour {
        Hour::new(value).expect("valid hour")
    }

    fn set(values: &[u8]) -> BTreeSet<Hour> {
        values.iter().map(|value| hour(*value)).collect()
    }

    fn schedule_with(day: Weekday, values: &[u8]) -> WeekSchedule {
        WeekSchedule::from_days([(day, set(values))])
    }

    #[test]
    fn range_fill_is_inclusive_and_skips_booked() {
        let schedule = schedule_with(Weekday::Wed, &[8]);
        let mut session = EditSession::new(Weekday::Wed);

        assert_eq!(
            session.select_hour(&schedule, hour(6)),
            SelectOutcome::Anchored
        );
        assert_eq!(session.anchor(), RangeAnchor::Anchored(hour(6)));
        assert_eq!(
            session.select_hour(&schedule, hour(10)),
            SelectOutcome::RangeFilled { added: 3 }
        );

        assert_eq!(session.pending(), &set(&[6, 7, 9, 10]));
        assert_eq!(session.anchor(), RangeAnchor::Idle);
    }

    #[test]
    fn range_fill_works_backwards() {
        let schedule = WeekSchedule::empty();
        let mut session = EditSession::new(Weekday::Mon);
        session.select_hour(&schedule, hour(12));
        session.select_hour(&schedule, hour(9));
        assert_eq!(session.pending(), &set(&[9, 10, 11, 12]));
    }

    #[test]
    fn booked_hours_are_never_selected() {
        let mut schedule = schedule_with(Weekday::Mon, &[6, 7]);
        let mut session = EditSession::new(Weekday::Mon);

        assert_eq!(
            session.select_hour(&schedule, hour(7)),
            SelectOutcome::Booked
        );
        assert!(session.pending().is_empty());
        assert_eq!(session.anchor(), RangeAnchor::Idle);

        session.select_hour(&schedule, hour(5));
        session.select_hour(&schedule, hour(9));
        assert_eq!(session.pending(), &set(&[5, 8, 9]));

        let merged = session.commit(&mut schedule).expect("pending hours");
        assert!(merged.contains(&hour(6)));
        assert!(merged.contains(&hour(7)));
        assert_eq!(merged, set(&[5, 6, 7, 8, 9]));
    }

    #[test]
    fn toggle_twice_restores_pending_and_clears_anchor() {
        let schedule = WeekSchedule::empty();
        let mut session = EditSession::new(Weekday::Thu);
        session.select_hour(&schedule, hour(14));
        session.select_hour(&schedule, hour(16));
        let before = session.pending().clone();

        assert_eq!(
            session.select_hour(&schedule, hour(19)),
            SelectOutcome::Anchored
        );
        assert_eq!(
            session.select_hour(&schedule, hour(19)),
            SelectOutcome::Deselected
        );

        assert_eq!(session.pending(), &before);
        assert_eq!(session.anchor(), RangeAnchor::Idle);
    }

    #[test]
    fn deselecting_another_hour_keeps_anchor() {
        let schedule = WeekSchedule::empty();
        let mut session = EditSession::new(Weekday::Fri);
        session.select_hour(&schedule, hour(6));
        session.select_hour(&schedule, hour(8));
        session.select_hour(&schedule, hour(12));
        assert_eq!(session.anchor(), RangeAnchor::Anchored(hour(12)));

        session.select_hour(&schedule, hour(7));
        assert_eq!(session.anchor(), RangeAnchor::Anchored(hour(12)));
        assert_eq!(session.pending(), &set(&[6, 8, 12]));
    }

    #[test]
    fn overlapping_ranges_do_not_duplicate() {
        let schedule = WeekSchedule::empty();
        let mut session = EditSession::new(Weekday::Sat);
        session.select_hour(&schedule, hour(6));
        session.select_hour(&schedule, hour(9));
        session.select_hour(&schedule, hour(11));

        assert_eq!(
            session.select_hour(&schedule, hour(5)),
            SelectOutcome::RangeFilled { added: 2 }
        );
        assert_eq!(session.pending(), &set(&[5, 6, 7, 8, 9, 10, 11]));
    }

    #[test]
    fn commit_merges_and_resets() {
        let mut schedule = schedule_with(Weekday::Tue, &[6]);
        let mut session = EditSession::new(Weekday::Tue);
        session.select_hour(&schedule, hour(9));
        session.select_hour(&schedule, hour(10));

        let merged = session.commit(&mut schedule).expect("pending hours");

        assert_eq!(merged, set(&[6, 9, 10]));
        assert_eq!(schedule.booked(Weekday::Tue), &merged);
        assert!(session.pending().is_empty());
        assert_eq!(session.anchor(), RangeAnchor::Idle);
        assert!(!session.can_commit());
    }

    #[test]
    fn commit_with_nothing_pending_is_a_no_op() {
        let mut schedule = WeekSchedule::demo();
        let before = schedule.clone();
        let mut session = EditSession::new(Weekday::Mon);

        assert_eq!(session.commit(&mut schedule), None);
        assert_eq!(schedule, before);
    }

    #[test]
    fn cancel_leaves_schedule_untouched() {
        let schedule = WeekSchedule::demo();
        let mut session = EditSession::new(Weekday::Sun);
        session.select_hour(&schedule, hour(10));
        session.cancel();

        assert!(session.pending().is_empty());
        assert_eq!(session.anchor(), RangeAnchor::Idle);
        assert!(schedule.is_free(Weekday::Sun));
    }

    #[test]
    fn slot_states_and_hint_follow_gesture() {
        let schedule = schedule_with(Weekday::Mon, &[6]);
        let mut session = EditSession::new(Weekday::Mon);
        assert_eq!(
            session.hint(),
            "Tap an hour or tap and drag to select a range."
        );

        session.select_hour(&schedule, hour(9));
        assert_eq!(session.hint(), "Tap another hour to select a range.");
        assert_eq!(session.slot_state(&schedule, hour(6)), SlotState::Booked);
        assert_eq!(session.slot_state(&schedule, hour(9)), SlotState::Pending);
        assert_eq!(session.slot_state(&schedule, hour(10)), SlotState::Free);
    }
}
