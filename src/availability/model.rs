use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Weekday;
use log::{debug, info};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::availability::hour::Hour;
use crate::availability::ranges::compress;

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Booked hours for each day of the week.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WeekSchedule {
    days: [BTreeSet<Hour>; 7],
}

impl WeekSchedule {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = (Weekday, BTreeSet<Hour>)>,
    {
        let mut schedule = Self::empty();
        for (day, hours) in days {
            schedule.days[day_index(day)] = hours;
        }
        schedule
    }

    /// Monday mornings and evenings plus a packed Saturday.
    pub fn demo() -> Self {
        let monday = [6, 7, 8, 9, 17, 18, 19, 21];
        Self::from_days([
            (Weekday::Mon, hours_from(monday)),
            (Weekday::Sat, hours_from(6..=21)),
        ])
    }

    pub fn booked(&self, day: Weekday) -> &BTreeSet<Hour> {
        &self.days[day_index(day)]
    }

    pub fn is_booked(&self, day: Weekday, hour: Hour) -> bool {
        self.booked(day).contains(&hour)
    }

    pub fn is_free(&self, day: Weekday) -> bool {
        self.booked(day).is_empty()
    }

    pub fn total_booked(&self) -> usize {
        self.days.iter().map(BTreeSet::len).sum()
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &BTreeSet<Hour>)> {
        WEEK.into_iter().map(move |day| (day, self.booked(day)))
    }

    /// Replaces the day's hours with `existing ∪ new_hours` and returns the
    /// merged set. The previous set is dropped, never edited in place.
    pub fn commit_merge(&mut self, day: Weekday, new_hours: &BTreeSet<Hour>) -> BTreeSet<Hour> {
        let merged = self
            .booked(day)
            .union(new_hours)
            .copied()
            .collect::<BTreeSet<_>>();
        debug!(
            "merged {} hour(s) into {}: {} -> {} booked",
            new_hours.len(),
            day_name(day),
            self.booked(day).len(),
            merged.len()
        );
        self.days[day_index(day)] = merged.clone();
        merged
    }

    pub fn snapshot(&self) -> WeekSnapshot {
        WeekSnapshot {
            days: self
                .days()
                .map(|(day, hours)| DaySnapshot {
                    day: day_name(day).to_string(),
                    booked: hours.iter().copied().collect(),
                    summary: compress(hours),
                })
                .collect(),
            total_booked: self.total_booked(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekSnapshot {
    pub days: Vec<DaySnapshot>,
    pub total_booked: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySnapshot {
    pub day: String,
    pub booked: Vec<Hour>,
    pub summary: String,
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn day_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

fn hours_from<I>(values: I) -> BTreeSet<Hour>
where
    I: IntoIterator<Item = u8>,
{
    values
        .into_iter()
        .filter_map(|value| Hour::new(value).ok())
        .collect()
}

pub fn load_seed(path: &Path) -> Result<WeekSchedule> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read seed file {}", path.display()))?;
    let schedule = parse_seed_text(&content)?;
    info!(
        "loaded {} booked hour(s) from {}",
        schedule.total_booked(),
        path.display()
    );
    Ok(schedule)
}

pub fn parse_seed_text(content: &str) -> Result<WeekSchedule> {
    let raw = serde_json::from_str::<SeedFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported seed file version {}; expected version 1",
            raw.version
        );
    }

    let mut seen = BTreeSet::new();
    let mut days = Vec::with_capacity(raw.days.len());
    for (token, values) in raw.days {
        let day = token.to_chrono();
        if !seen.insert(token) {
            bail!("duplicate day {}", day_name(day));
        }
        let mut hours = BTreeSet::new();
        for value in values {
            let hour = Hour::new(value)
                .with_context(|| format!("invalid hour on {}", day_name(day)))?;
            if !hours.insert(hour) {
                bail!("duplicate hour {value} on {}", day_name(day));
            }
        }
        days.push((day, hours));
    }

    Ok(WeekSchedule::from_days(days))
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    version: u32,
    #[serde(default, deserialize_with = "day_entries")]
    days: Vec<(WeekdayToken, Vec<u8>)>,
}

/// Reads the `days` object entry by entry so a day listed twice, possibly
/// under two spellings, reaches validation instead of being overwritten.
fn day_entries<'de, D>(deserializer: D) -> Result<Vec<(WeekdayToken, Vec<u8>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DayEntries;

    impl<'de> Visitor<'de> for DayEntries {
        type Value = Vec<(WeekdayToken, Vec<u8>)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping day names to hour lists")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<WeekdayToken, Vec<u8>>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(DayEntries)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Deserialize)]
enum WeekdayToken {
    #[serde(alias = "Monday")]
    Mon,
    #[serde(alias = "Tuesday")]
    Tue,
    #[serde(alias = "Wednesday")]
    Wed,
    #[serde(alias = "Thursday")]
    Thu,
    #[serde(alias = "Friday")]
    Fri,
    #[serde(alias = "Saturday")]
    Sat,
    #[serde(alias = "Sunday")]
    Sun,
}

impl WeekdayToken {
    fn to_chrono(self) -> Weekday {
        match self {
            WeekdayToken::Mon => Weekday::Mon,
            WeekdayToken::Tue => Weekday::Tue,
            WeekdayToken::Wed => Weekday::Wed,
            WeekdayToken::Thu => Weekday::Thu,
            WeekdayToken::Fri => Weekday::Fri,
            WeekdayToken::Sat => Weekday::Sat,
            WeekdayToken::Sun => Weekday::Sun,
        }
    }
}
