// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Participant name is empty after trimming.
    EmptyName,
    /// Event kind string is not one of the allowed values.
    UnknownEventKind(String),
    /// A date string or (year, month, day) triple is not a valid calendar date.
    InvalidDate(String),
    /// Event end date precedes its start date.
    EndBeforeStart {
        /// The event start date.
        start: Date,
        /// The offending end date.
        end: Date,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Participant name must not be empty"),
            Self::UnknownEventKind(kind) => write!(f, "Unknown event kind: '{kind}'"),
            Self::InvalidDate(value) => write!(f, "Invalid calendar date: '{value}'"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Event end date {end} precedes start date {start}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
