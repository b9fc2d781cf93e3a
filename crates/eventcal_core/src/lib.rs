//! Core of the eventcal text calendar.
//!
//! Holds the month-scoped event cache, its SQLite-backed store and the
//! month grid renderer. The interactive prompt loop lives in `eventcal_cli`.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{month_layout, render, MonthLayout};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, NewEvent};
pub use model::month::{InvalidMonth, MonthContext, SUPPORTED_YEARS};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use service::month_calendar::{CalendarError, CalendarResult, DayBuckets, MonthCalendar};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
