//! Month cache: the in-memory view of one month's events.
//!
//! # Responsibility
//! - Hold every event of the selected month, bucketed by day of month.
//! - Apply add/delete to the store first and mirror them into the cache.
//! - Reload wholesale on month change.
//!
//! # Invariants
//! - Every cached event lies in the current month, in the bucket of its day.
//! - No bucket is empty.
//! - The cache never holds an event the store does not have.
//! - On any error, context and cache are exactly as before the call.

use crate::calendar;
use crate::model::event::{Event, NewEvent};
use crate::model::month::{InvalidMonth, MonthContext};
use crate::repo::event_repo::{EventRepository, RepoError};
use chrono::NaiveDateTime;
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Day of month (1-based) to the events on that day, in load/insert order.
pub type DayBuckets = BTreeMap<u32, Vec<Event>>;

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Error for month calendar use-cases.
#[derive(Debug)]
pub enum CalendarError {
    /// Requested (year, month) does not name a real month.
    InvalidMonth(InvalidMonth),
    /// The store rejected or failed the operation.
    Store(RepoError),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "store operation failed: {err}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidMonth(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<InvalidMonth> for CalendarError {
    fn from(value: InvalidMonth) -> Self {
        Self::InvalidMonth(value)
    }
}

impl From<RepoError> for CalendarError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

/// Calendar for one selected month, backed by an event repository.
pub struct MonthCalendar<R: EventRepository> {
    repo: R,
    context: MonthContext,
    buckets: DayBuckets,
}

impl<R: EventRepository> MonthCalendar<R> {
    /// Creates a calendar and loads `year`/`month` (1-based) from the store.
    pub fn open(repo: R, year: i32, month: u32) -> CalendarResult<Self> {
        let context = MonthContext::new(year, month)?;
        let buckets = load_buckets(&repo, context)?;
        Ok(Self {
            repo,
            context,
            buckets,
        })
    }

    /// Switches to another month, replacing the cache with a fresh load.
    ///
    /// The old context and cache stay in place when validation or the
    /// store query fails.
    pub fn change_month(&mut self, year: i32, month: u32) -> CalendarResult<()> {
        let context = MonthContext::new(year, month)?;
        let buckets = load_buckets(&self.repo, context)?;
        self.context = context;
        self.buckets = buckets;
        Ok(())
    }

    /// Persists a new event, then caches it under its day.
    ///
    /// `time` is expected to fall inside the current month. An event outside
    /// it is persisted but not cached.
    pub fn add_event(
        &mut self,
        name: &str,
        note: Option<&str>,
        time: NaiveDateTime,
    ) -> CalendarResult<Event> {
        let draft = NewEvent::new(name, note, time);
        let event = match self.repo.insert_event(&draft) {
            Ok(event) => event,
            Err(err) => {
                error!("event=event_add module=calendar status=error error={err}");
                return Err(err.into());
            }
        };

        info!(
            "event=event_add module=calendar status=ok id={} day={}",
            event.id(),
            event.day()
        );
        if self.context.contains(event.time()) {
            self.buckets
                .entry(event.day())
                .or_default()
                .push(event.clone());
        } else {
            warn!(
                "event=event_add module=calendar status=ok id={} cached=false reason=outside_month",
                event.id()
            );
        }
        Ok(event)
    }

    /// Deletes `event` from the store, then drops it from its day bucket.
    ///
    /// An id the store no longer has counts as deleted.
    pub fn delete_event(&mut self, event: &Event) -> CalendarResult<()> {
        match self.repo.delete_event(event.id()) {
            Ok(()) => {
                info!(
                    "event=event_delete module=calendar status=ok id={}",
                    event.id()
                );
            }
            Err(RepoError::NotFound(id)) => {
                warn!("event=event_delete module=calendar status=ok id={id} stale=true");
            }
            Err(err) => {
                error!(
                    "event=event_delete module=calendar status=error id={} error={err}",
                    event.id()
                );
                return Err(err.into());
            }
        }

        self.deregister(event);
        Ok(())
    }

    fn deregister(&mut self, event: &Event) {
        let day = event.day();
        let Some(bucket) = self.buckets.get_mut(&day) else {
            return;
        };
        bucket.retain(|cached| cached.id() != event.id());
        if bucket.is_empty() {
            self.buckets.remove(&day);
        }
    }

    pub fn year(&self) -> i32 {
        self.context.year()
    }

    /// Current month, 1-based.
    pub fn month(&self) -> u32 {
        self.context.month()
    }

    /// Label such as `February 2024`.
    pub fn month_and_year_name(&self) -> String {
        self.context.label()
    }

    /// Day buckets of the current month.
    pub fn events(&self) -> &DayBuckets {
        &self.buckets
    }

    /// All cached events, in day order and then bucket order.
    pub fn all_events(&self) -> Vec<&Event> {
        self.buckets.values().flatten().collect()
    }

    pub fn event_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn days_with_events(&self) -> BTreeSet<u32> {
        self.buckets.keys().copied().collect()
    }

    /// Text grid of the current month with event markers.
    pub fn render_calendar(&self) -> String {
        calendar::render(self.context, &self.days_with_events(), self.event_count())
    }
}

fn load_buckets<R: EventRepository>(repo: &R, context: MonthContext) -> CalendarResult<DayBuckets> {
    let started_at = Instant::now();
    let events = match repo.list_month(context) {
        Ok(events) => events,
        Err(err) => {
            error!(
                "event=month_load module=calendar status=error year={} month={} error={err}",
                context.year(),
                context.month()
            );
            return Err(err.into());
        }
    };

    let mut buckets = DayBuckets::new();
    let mut count = 0usize;
    for event in events {
        if !context.contains(event.time()) {
            debug!(
                "event=month_load module=calendar status=skip id={} reason=outside_month",
                event.id()
            );
            continue;
        }
        buckets.entry(event.day()).or_default().push(event);
        count += 1;
    }

    info!(
        "event=month_load module=calendar status=ok year={} month={} events={} duration_ms={}",
        context.year(),
        context.month(),
        count,
        started_at.elapsed().as_millis()
    );
    Ok(buckets)
}
