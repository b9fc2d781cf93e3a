//! Event value objects.
//!
//! # Responsibility
//! - Represent an event before persistence (`NewEvent`) and after it
//!   (`Event`), so a store-assigned id can never be missing or invented.
//! - Provide display helpers used by the prompt loop.
//!
//! # Invariants
//! - `note` is `None` whenever the caller supplied no text or empty text.
//! - `time` has zero seconds and zero sub-second precision.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier (SQLite rowid).
pub type EventId = i64;

const SHORT_DATE_FORMAT: &str = "%B %d";
const LONG_DATE_FORMAT: &str = "%A, %B %d, %Y";
const TIME_FORMAT: &str = "%I:%M %p";

/// Event that has not been written to the store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    name: String,
    note: Option<String>,
    time: NaiveDateTime,
}

impl NewEvent {
    /// Builds an unsaved event, normalizing the note and truncating `time`
    /// to the minute.
    pub fn new(name: impl Into<String>, note: Option<&str>, time: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            note: normalize_note(note),
            time: truncate_to_minute(time),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Attaches the id generated by the store's insert.
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            note: self.note,
            time: self.time,
        }
    }
}

/// Persisted calendar event.
///
/// Identity is `id`; two events sharing name and time are still distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    note: Option<String>,
    time: NaiveDateTime,
}

impl Event {
    /// Rebuilds an event from a stored row.
    pub fn from_parts(
        id: EventId,
        name: impl Into<String>,
        note: Option<&str>,
        time: NaiveDateTime,
    ) -> Self {
        NewEvent::new(name, note, time).into_event(id)
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Day of month (1-based) the event falls on.
    pub fn day(&self) -> u32 {
        self.time.day()
    }

    /// Short date and time without the year, e.g. `February 05 at 09:00 AM`.
    pub fn date_and_time(&self) -> String {
        format!(
            "{} at {}",
            self.time.format(SHORT_DATE_FORMAT),
            self.time.format(TIME_FORMAT)
        )
    }

    /// Multi-line description shown when a single event is viewed.
    pub fn details(&self) -> String {
        let mut out = format!("EVENT NAME: {}\n", self.name);
        if let Some(note) = self.note() {
            out.push_str(&format!(" -- NOTE: \"{note}\"\n"));
        }
        out.push_str(&format!(" -- DATE: {}\n", self.time.format(LONG_DATE_FORMAT)));
        out.push_str(&format!(" -- TIME: {}\n", self.time.format(TIME_FORMAT)));
        out
    }
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.filter(|value| !value.is_empty()).map(str::to_string)
}

fn truncate_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    // with_second(0) / with_nanosecond(0) only fail on out-of-range input.
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::{Event, NewEvent};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn empty_note_is_treated_as_absent() {
        let draft = NewEvent::new("Standup", Some(""), at(5, 9, 0, 0));
        assert_eq!(draft.note(), None);

        let event = Event::from_parts(1, "Standup", Some(""), at(5, 9, 0, 0));
        assert_eq!(event.note(), None);
    }

    #[test]
    fn timestamp_is_truncated_to_minute() {
        let draft = NewEvent::new("Standup", None, at(5, 9, 30, 42));
        assert_eq!(draft.time(), at(5, 9, 30, 0));
    }

    #[test]
    fn into_event_keeps_fields_and_assigns_id() {
        let event = NewEvent::new("Review", Some("room 4"), at(12, 14, 15, 0)).into_event(7);
        assert_eq!(event.id(), 7);
        assert_eq!(event.name(), "Review");
        assert_eq!(event.note(), Some("room 4"));
        assert_eq!(event.day(), 12);
    }

    #[test]
    fn date_and_time_uses_twelve_hour_clock() {
        let event = Event::from_parts(1, "Standup", None, at(5, 9, 0, 0));
        assert_eq!(event.date_and_time(), "February 05 at 09:00 AM");

        let late = Event::from_parts(2, "Dinner", None, at(5, 19, 30, 0));
        assert_eq!(late.date_and_time(), "February 05 at 07:30 PM");
    }

    #[test]
    fn details_skip_missing_note() {
        let event = Event::from_parts(1, "Standup", None, at(5, 9, 0, 0));
        assert_eq!(
            event.details(),
            "EVENT NAME: Standup\n -- DATE: Monday, February 05, 2024\n -- TIME: 09:00 AM\n"
        );

        let noted = Event::from_parts(2, "Standup", Some("bring notes"), at(5, 9, 0, 0));
        assert!(noted.details().contains(" -- NOTE: \"bring notes\"\n"));
    }
}
