// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-backed event store for the duty rota.
//!
//! This crate owns the two persistent relations of the system: the
//! participant roster and the scheduled events. It enforces the
//! per-participant non-overlap invariant at event creation and provides the
//! range and aggregate queries the assignment engine runs on.
//!
//! Built on Diesel with embedded migrations. `SQLite` is the only backend;
//! in-memory databases back the tests, file databases run with WAL enabled.
//! Foreign key enforcement is verified at connection setup because
//! participant deletion relies on cascade deletes.
//!
//! Every operation is individually atomic (a single statement). Sequences
//! of operations, such as the engine's clear-then-reassign run, are not
//! wrapped in one transaction here; a caller needing whole-run atomicity
//! must manage a transaction itself.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use duty_rota_domain::{Event, EventKind, MonthSpan, Participant};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod backend;
mod error;
mod mutations;
mod queries;
mod rows;
mod schema;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use error::StoreError;
pub use queries::{AbsenceTotals, MonthSnapshot, WeekdayCount};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so tests
/// are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The event store: participants and their scheduled events.
///
/// Holds a single connection; all methods take `&mut self`, so one store
/// value never runs two operations concurrently. Callers coordinating
/// multiple writers must serialize externally.
pub struct EventStore {
    conn: SqliteConnection,
}

impl EventStore {
    /// Creates a store backed by a fresh in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:duty_rota_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a file database, with WAL enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path_text: &str = path
            .as_ref()
            .to_str()
            .ok_or_else(|| StoreError::Initialization(String::from("Invalid database path")))?;

        let mut conn: SqliteConnection = backend::initialize_database(path_text)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Adds a participant, assigning the next sort rank.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Domain(DomainError::EmptyName)` if the name is
    /// empty after trimming, or a storage error if the write fails.
    pub fn add_participant(&mut self, name: &str) -> Result<Participant, StoreError> {
        mutations::add_participant(&mut self.conn, name)
    }

    /// Deletes a participant, cascading to all their events. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_participant(&mut self, id: i64) -> Result<(), StoreError> {
        mutations::delete_participant(&mut self.conn, id)
    }

    /// Rewrites sort ranks from the provided ordering.
    ///
    /// Listed ids get their position index as rank; unknown ids are
    /// silently ignored; unlisted participants are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if an update fails.
    pub fn reorder_participants(&mut self, ordered_ids: &[i64]) -> Result<(), StoreError> {
        mutations::reorder_participants(&mut self.conn, ordered_ids)
    }

    /// Lists the roster ordered by sort rank, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_participants(&mut self) -> Result<Vec<Participant>, StoreError> {
        queries::list_participants(&mut self.conn)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Creates an event, enforcing the non-overlap invariant.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Domain` for an inverted range,
    /// `StoreError::UnknownParticipant` for a missing owner,
    /// `StoreError::OverlappingEvent` when the range intersects an existing
    /// event for the same participant, or a storage error if the write
    /// fails. Nothing is written on rejection.
    pub fn create_event(
        &mut self,
        participant_id: i64,
        kind: EventKind,
        start: Date,
        end: Date,
    ) -> Result<Event, StoreError> {
        mutations::create_event(&mut self.conn, participant_id, kind, start, end)
    }

    /// Deletes an event by id. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_event(&mut self, id: i64) -> Result<(), StoreError> {
        mutations::delete_event(&mut self.conn, id)
    }

    /// Returns events whose range intersects `[start, end]`, optionally
    /// filtered to one participant and optionally excluding one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is unreadable.
    pub fn events_overlapping(
        &mut self,
        participant: Option<i64>,
        exclude_kind: Option<EventKind>,
        start: Date,
        end: Date,
    ) -> Result<Vec<Event>, StoreError> {
        queries::events_overlapping(&mut self.conn, participant, exclude_kind, start, end)
    }

    /// Returns the roster plus every event overlapping the month.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn month_snapshot(&mut self, span: &MonthSpan) -> Result<MonthSnapshot, StoreError> {
        queries::month_snapshot(&mut self.conn, span)
    }

    // ========================================================================
    // Scheduling support
    // ========================================================================

    /// Counts duty events starting inside the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_duty_starts(&mut self, span: &MonthSpan) -> Result<i64, StoreError> {
        queries::count_duty_starts(&mut self.conn, span)
    }

    /// Deletes duty events starting inside the month, returning the count.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_duty_starts(&mut self, span: &MonthSpan) -> Result<usize, StoreError> {
        mutations::delete_duty_starts(&mut self.conn, span)
    }

    /// Counts duty events per participant and weekday for one year.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is unreadable.
    pub fn duty_weekday_counts(&mut self, year: i32) -> Result<Vec<WeekdayCount>, StoreError> {
        queries::duty_weekday_counts(&mut self.conn, year)
    }

    /// Finds the most recent duty event starting strictly before `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is unreadable.
    pub fn last_duty_before(&mut self, date: Date) -> Result<Option<(i64, Date)>, StoreError> {
        queries::last_duty_before(&mut self.conn, date)
    }

    /// Lists the distinct years that have any events, descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is unreadable.
    pub fn event_years(&mut self) -> Result<Vec<i32>, StoreError> {
        queries::event_years(&mut self.conn)
    }

    /// Sums vacation and sick days per participant for one year, clipping
    /// ranges that straddle the year boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is unreadable.
    pub fn absence_days(&mut self, year: i32) -> Result<HashMap<i64, AbsenceTotals>, StoreError> {
        queries::absence_days(&mut self.conn, year)
    }
}
