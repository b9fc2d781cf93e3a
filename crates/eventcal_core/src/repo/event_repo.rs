//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Month-filtered load, insert-with-generated-id and delete-by-id over
//!   the `events` table.
//!
//! # Invariants
//! - Month loads return rows in id (insertion) order.
//! - Read paths reject rows whose data cannot be represented instead of
//!   masking them.

use crate::db::DbError;
use crate::model::event::{Event, EventId, NewEvent};
use crate::model::month::MonthContext;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENT_SELECT_SQL: &str = "SELECT id, name, note, time FROM events";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure of a single store operation on an established session.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EventId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent event store.
pub trait EventRepository {
    /// All events whose timestamp falls inside `month`.
    fn list_month(&self, month: MonthContext) -> RepoResult<Vec<Event>>;
    /// Persists `event` and returns it with the generated id.
    fn insert_event(&self, event: &NewEvent) -> RepoResult<Event>;
    /// Deletes by id; `NotFound` when no row had that id.
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
}

impl<R: EventRepository + ?Sized> EventRepository for &R {
    fn list_month(&self, month: MonthContext) -> RepoResult<Vec<Event>> {
        (**self).list_month(month)
    }

    fn insert_event(&self, event: &NewEvent) -> RepoResult<Event> {
        (**self).insert_event(event)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        (**self).delete_event(id)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        (**self).get_event(id)
    }
}

/// SQLite-backed event repository borrowing the session connection.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn list_month(&self, month: MonthContext) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE CAST(strftime('%Y', time) AS INTEGER) = ?1
               AND CAST(strftime('%m', time) AS INTEGER) = ?2
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params![month.year(), month.month()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        debug!(
            "event=store_query module=repo status=ok year={} month={} rows={}",
            month.year(),
            month.month(),
            events.len()
        );
        Ok(events)
    }

    fn insert_event(&self, event: &NewEvent) -> RepoResult<Event> {
        let id: EventId = self.conn.query_row(
            "INSERT INTO events (name, note, time)
             VALUES (?1, ?2, ?3)
             RETURNING id;",
            params![event.name(), event.note(), event.time()],
            |row| row.get(0),
        )?;

        Ok(event.clone().into_event(id))
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_event_row(row)))
            .optional()?;
        row.transpose()
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let id: EventId = row.get("id")?;
    let name: String = row.get("name")?;
    let note: Option<String> = row.get("note")?;
    let time = row.get("time").map_err(|err| {
        RepoError::InvalidData(format!("invalid timestamp in events.time for id {id}: {err}"))
    })?;

    Ok(Event::from_parts(id, name, note.as_deref(), time))
}
