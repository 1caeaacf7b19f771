// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The closed set of event kinds.
///
/// `Duty` is the kind being scheduled; every other kind blocks the owning
/// participant for the days it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The recurring assignment being scheduled.
    Duty,
    /// An important personal commitment.
    Important,
    /// Vacation leave.
    Vacation,
    /// A business trip.
    Trip,
    /// Sick leave.
    Sick,
}

impl EventKind {
    /// Converts this kind to the string persisted in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duty => "duty",
            Self::Important => "important",
            Self::Vacation => "vacation",
            Self::Trip => "trip",
            Self::Sick => "sick",
        }
    }

    /// Whether this kind renders the owner unavailable for duty.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        !matches!(self, Self::Duty)
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duty" => Ok(Self::Duty),
            "important" => Ok(Self::Important),
            "vacation" => Ok(Self::Vacation),
            "trip" => Ok(Self::Trip),
            "sick" => Ok(Self::Sick),
            _ => Err(DomainError::UnknownEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A roster member eligible for duty assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The canonical numeric identifier assigned by the store.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Explicit sort rank; defines stable display and selection order.
    pub sort_order: i32,
}

/// A scheduled event owned by one participant.
///
/// Events are immutable once created; edits are modeled as delete plus
/// recreate. For a given participant no two events may have intersecting
/// inclusive date ranges, regardless of kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The canonical numeric identifier assigned by the store.
    pub id: i64,
    /// The owning participant.
    pub participant_id: i64,
    /// The event kind.
    pub kind: EventKind,
    /// Inclusive start date.
    pub start_date: Date,
    /// Inclusive end date.
    pub end_date: Date,
    /// Creation timestamp as recorded by the store, if known.
    pub created_at: Option<String>,
}

impl Event {
    /// Whether this event's inclusive range intersects `[start, end]`.
    #[must_use]
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        !(self.end_date < start || self.start_date > end)
    }
}
