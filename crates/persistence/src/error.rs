// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use duty_rota_domain::DomainError;
use time::Date;

/// Errors that can occur during event store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input failed domain validation; nothing was written.
    Domain(DomainError),
    /// The referenced participant does not exist.
    UnknownParticipant(i64),
    /// The new event's range intersects an existing event for the same
    /// participant; nothing was written. The caller may retry with an
    /// adjusted range.
    OverlappingEvent {
        /// The owning participant.
        participant_id: i64,
        /// The rejected range start.
        start: Date,
        /// The rejected range end.
        end: Date,
    },
    /// Database connection failed.
    ConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A database error occurred.
    Database(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// Initialization error.
    Initialization(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "Validation error: {err}"),
            Self::UnknownParticipant(id) => write!(f, "Participant not found: {id}"),
            Self::OverlappingEvent {
                participant_id,
                start,
                end,
            } => write!(
                f,
                "Event {start}..{end} overlaps an existing event for participant {participant_id}"
            ),
            Self::ConnectionFailed(msg) => write!(f, "Database connection failed: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::Database(msg) => write!(f, "Database error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::Initialization(msg) => write!(f, "Initialization error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<diesel::ConnectionError> for StoreError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::ConnectionFailed(err.to_string())
    }
}
