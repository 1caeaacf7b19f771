// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and their conversions into domain types.

use diesel::prelude::*;
use duty_rota_domain::{Event, EventKind, Participant, parse_date};

use crate::error::StoreError;
use crate::schema::{events, participants};

/// Queryable struct for participant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = participants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ParticipantRow {
    pub participant_id: i64,
    pub name: String,
    pub sort_order: i32,
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        Self {
            id: row.participant_id,
            name: row.name,
            sort_order: row.sort_order,
        }
    }
}

/// Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRow {
    pub event_id: i64,
    pub participant_id: i64,
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: Option<String>,
}

impl TryFrom<EventRow> for Event {
    type Error = StoreError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let kind: EventKind = row
            .kind
            .parse()
            .map_err(|_| corrupt_row(row.event_id, "kind", &row.kind))?;
        let start_date = parse_date(&row.start_date)
            .map_err(|_| corrupt_row(row.event_id, "start_date", &row.start_date))?;
        let end_date = parse_date(&row.end_date)
            .map_err(|_| corrupt_row(row.event_id, "end_date", &row.end_date))?;
        Ok(Self {
            id: row.event_id,
            participant_id: row.participant_id,
            kind,
            start_date,
            end_date,
            created_at: row.created_at,
        })
    }
}

fn corrupt_row(event_id: i64, column: &str, value: &str) -> StoreError {
    StoreError::QueryFailed(format!(
        "event row {event_id} has unreadable {column}: '{value}'"
    ))
}
