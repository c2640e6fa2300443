//! Event records: date ranges with an optional color and any number of
//! opaque host-defined fields

use crate::util::days_in_month;
use serde::{
    de::Error as _, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, Month,
    OffsetDateTime, PrimitiveDateTime, Time,
};
use tracing::debug;

/// Keys of the event object that are stored outside of the opaque fields
const RESERVED_KEYS: [&str; 3] = ["start", "end", "color"];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    color: Option<String>,
    fields: Map<String, Value>,
}

impl EventRecord {
    pub fn new(start: PrimitiveDateTime, end: PrimitiveDateTime) -> EventRecord {
        EventRecord {
            start,
            end,
            color: None,
            fields: Map::new(),
        }
    }

    /// Creates an event spanning whole days from `start` through `end`
    pub fn all_day(start: Date, end: Date) -> EventRecord {
        EventRecord::new(start.midnight(), end.midnight())
    }

    /// Creates an event from date strings in any of the forms accepted by
    /// [`parse_datetime()`]
    pub fn parse(start: &str, end: &str) -> Result<EventRecord, EventError> {
        Ok(EventRecord::new(parse_datetime(start)?, parse_datetime(end)?))
    }

    pub fn with_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Attaches an opaque field.  The keys `start`, `end`, and `color` name
    /// the event's own properties, so fields with those keys are ignored.
    pub fn with_field<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            debug!(%key, "Ignoring event field with reserved key");
        } else {
            self.fields.insert(key, value);
        }
        self
    }

    pub fn start(&self) -> PrimitiveDateTime {
        self.start
    }

    pub fn end(&self) -> PrimitiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> Date {
        self.start.date()
    }

    pub fn end_date(&self) -> Date {
        self.end.date()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Whether the event belongs to the given month's event list, i.e.,
    /// whether it starts or ends in that month.  An event that starts before
    /// the month and ends after it does not belong to it.
    pub fn belongs_to_month(&self, year: i32, month: Month) -> bool {
        let in_month = |d: Date| d.year() == year && d.month() == month;
        in_month(self.start_date()) || in_month(self.end_date())
    }

    /// The days of the given month covered by the event, or `None` if the
    /// event does not belong to the month or its end precedes its start.
    /// A range that continues into the previous or next month is cut off at
    /// the month's first or last day.
    pub fn days_in(&self, year: i32, month: Month) -> Option<RangeInclusive<u8>> {
        if !self.belongs_to_month(year, month) {
            return None;
        }
        let start = self.start_date();
        let end = self.end_date();
        let first = if (start.year(), start.month()) == (year, month) {
            start.day()
        } else {
            1
        };
        let last = if (end.year(), end.month()) == (year, month) {
            end.day()
        } else {
            days_in_month(year, month)
        };
        (start <= end && first <= last).then_some(first..=last)
    }

    pub fn covers(&self, date: Date) -> bool {
        self.days_in(date.year(), date.month())
            .is_some_and(|days| days.contains(&date.day()))
    }
}

impl<'de> Deserialize<'de> for EventRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEvent::deserialize(deserializer)?;
        let mut event = EventRecord::parse(&raw.start, &raw.end).map_err(D::Error::custom)?;
        event.color = raw.color;
        event.fields = raw.fields;
        Ok(event)
    }
}

#[derive(Clone, Debug, Deserialize)]
struct RawEvent {
    start: String,
    end: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Serialize for EventRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("start", &format_datetime(self.start))?;
        map.serialize_entry("end", &format_datetime(self.end))?;
        if let Some(color) = self.color() {
            map.serialize_entry("color", color)?;
        }
        for (key, value) in &self.fields {
            // A duplicate key would make the output unparseable
            if !RESERVED_KEYS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Parses a JSON array of event objects, each with `start` and `end` date
/// strings, an optional `color`, and arbitrary other fields
pub fn parse_events_json(s: &str) -> Result<Vec<EventRecord>, EventError> {
    Ok(serde_json::from_str(s)?)
}

pub fn events_to_json(events: &[EventRecord]) -> Result<String, EventError> {
    Ok(serde_json::to_string(events)?)
}

// Midnight is written as a bare date, mirroring what `parse_datetime()`
// accepts.  Fractional seconds are written only when nonzero, without
// trailing zeroes.
fn format_datetime(dt: PrimitiveDateTime) -> String {
    if dt.time() == Time::MIDNIGHT {
        return dt.date().to_string();
    }
    let mut s = format!(
        "{}T{:02}:{:02}:{:02}",
        dt.date(),
        dt.hour(),
        dt.minute(),
        dt.second()
    );
    let nanos = dt.nanosecond();
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        s.push('.');
        s.push_str(digits.trim_end_matches('0'));
    }
    s
}

/// Parses an event date string.  Accepted forms are `YYYY-MM-DD`,
/// `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]`, and RFC 3339 timestamps
/// such as `2024-09-24T06:00:00.000Z`.  A timestamp's offset is discarded
/// and its date and time are kept as written.
pub fn parse_datetime(value: &str) -> Result<PrimitiveDateTime, EventError> {
    let value = value.trim();
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(PrimitiveDateTime::new(dt.date(), dt.time()));
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        value,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        ),
    ) {
        return Ok(dt);
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        value,
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ) {
        return Ok(dt);
    }
    match Date::parse(value, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Ok(date.midnight()),
        Err(source) => Err(EventError::InvalidDate {
            value: value.to_owned(),
            source,
        }),
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("invalid event date {value:?}")]
    InvalidDate {
        value: String,
        source: time::error::Parse,
    },
    #[error("failed to parse event data")]
    Json(#[from] serde_json::Error),
}
