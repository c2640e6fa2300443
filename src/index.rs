//! Per-month lookup of which days carry events, and the bullet markers drawn
//! for them

use crate::events::EventRecord;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month};
use tracing::trace;

/// Maximum number of bullets drawn under a single day in
/// [`BulletMode::Multiple`]
pub const MAX_BULLETS: usize = 5;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum BulletMode {
    /// One bullet per event, in event order, up to [`MAX_BULLETS`]
    #[default]
    Multiple,
    /// A single bullet colored after the day's first event
    Single,
}

impl FromStr for BulletMode {
    type Err = ParseBulletModeError;

    fn from_str(s: &str) -> Result<BulletMode, ParseBulletModeError> {
        match s {
            "multiple" => Ok(BulletMode::Multiple),
            "single" => Ok(BulletMode::Single),
            _ => Err(ParseBulletModeError),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid bullet mode; expected \"multiple\" or \"single\"")]
pub struct ParseBulletModeError;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Bullet {
    pub color: Option<String>,
}

/// Events of one month together with the days they cover.
///
/// Always built from the complete event list; the controller rebuilds it
/// whenever the displayed month or the event list changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventIndex {
    year: i32,
    month: Month,
    month_events: Vec<EventRecord>,
    // Day of month => indices into `month_events`, in event order
    day_events: BTreeMap<u8, Vec<usize>>,
}

impl EventIndex {
    pub fn for_month(events: &[EventRecord], year: i32, month: Month) -> EventIndex {
        let month_events = events
            .iter()
            .filter(|ev| ev.belongs_to_month(year, month))
            .cloned()
            .collect::<Vec<_>>();
        let mut day_events = BTreeMap::<u8, Vec<usize>>::new();
        for (i, ev) in month_events.iter().enumerate() {
            for day in ev.days_in(year, month).into_iter().flatten() {
                day_events.entry(day).or_default().push(i);
            }
        }
        trace!(
            year,
            %month,
            events = month_events.len(),
            days = day_events.len(),
            "Indexed events for month"
        );
        EventIndex {
            year,
            month,
            month_events,
            day_events,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Events starting or ending in the indexed month, in event order
    pub fn month_events(&self) -> &[EventRecord] {
        &self.month_events
    }

    pub fn day_has_event(&self, day: u8) -> bool {
        self.day_events.contains_key(&day)
    }

    pub fn days_with_events(&self) -> impl Iterator<Item = u8> + '_ {
        self.day_events.keys().copied()
    }

    pub fn day_events(&self, day: u8) -> impl Iterator<Item = &EventRecord> + '_ {
        self.day_events
            .get(&day)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.month_events.get(i))
    }

    pub fn bullets(&self, day: u8, mode: BulletMode) -> Vec<Bullet> {
        let bullets = self.day_events(day).map(|ev| Bullet {
            color: ev.color().map(String::from),
        });
        match mode {
            BulletMode::Multiple => bullets.take(MAX_BULLETS).collect(),
            BulletMode::Single => bullets.take(1).collect(),
        }
    }
}

/// Returns the events of `date`'s month that cover `date`
pub fn date_events(events: &[EventRecord], date: Date) -> Vec<EventRecord> {
    EventIndex::for_month(events, date.year(), date.month())
        .day_events(date.day())
        .cloned()
        .collect()
}
