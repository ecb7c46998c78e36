use chrono::Weekday;

use crate::availability::blocks::blocks;
use crate::availability::model::{WeekSchedule, day_name};
use crate::availability::ranges::compress;
use crate::availability::selection::{EditSession, SlotState};
use crate::grid::GridConfig;

const DAY_COLUMN: usize = 10;
const LABEL_COLUMN: usize = 5;

#[derive(Debug, Clone, Eq, PartialEq)]
enum Row {
    BlockStart { end: String },
    BlockBody,
    Pending,
    Free,
}

pub fn weekly_overview(schedule: &WeekSchedule) -> String {
    let mut out = String::from("Weekly Overview\n");
    for (day, hours) in schedule.days() {
        let summary = if hours.is_empty() {
            "(free)".to_string()
        } else {
            compress(hours)
        };
        out.push_str(&format!("{:<DAY_COLUMN$} {summary}\n", day_name(day)));
    }
    out
}

/// Draws one row per grid hour. Booked runs come from [`blocks`]; pending
/// picks are only shown while `session` is editing the same day.
pub fn day_grid(
    grid: &GridConfig,
    schedule: &WeekSchedule,
    day: Weekday,
    session: Option<&EditSession>,
) -> String {
    let candidates = grid.candidates();
    let mut rows = vec![Row::Free; candidates.len()];
    for block in blocks(&candidates, schedule.booked(day)) {
        for index in block.rows() {
            rows[index] = Row::BlockBody;
        }
        rows[block.position] = Row::BlockStart { end: block.end() };
    }

    let session = session.filter(|session| session.day() == day);
    if let Some(session) = session {
        for (row, hour) in rows.iter_mut().zip(&candidates) {
            if session.slot_state(schedule, *hour) == SlotState::Pending {
                *row = Row::Pending;
            }
        }
    }

    let mut lines = vec![day_name(day).to_string()];
    if let Some(session) = session {
        lines.push(session.hint().to_string());
    }
    for (row, hour) in rows.iter().zip(&candidates) {
        let label = hour.label();
        lines.push(match row {
            Row::BlockStart { end } => format!("{label:>LABEL_COLUMN$} | # Booked until {end}"),
            Row::BlockBody => format!("{label:>LABEL_COLUMN$} | #"),
            Row::Pending => format!("{label:>LABEL_COLUMN$} | + selected"),
            Row::Free => format!("{label:>LABEL_COLUMN$} |"),
        });
    }
    lines.join("\n") + "\n"
}
