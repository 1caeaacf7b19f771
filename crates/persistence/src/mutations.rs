// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing event store operations.
//!
//! Validation happens before any write. Every mutation is a single
//! statement (or statement-per-row for reordering); the store never wraps
//! multiple operations in one transaction itself.

use diesel::dsl::max;
use diesel::prelude::*;
use duty_rota_domain::{DomainError, Event, EventKind, MonthSpan, Participant, format_date};
use time::Date;
use tracing::{debug, info};

use crate::backend;
use crate::error::StoreError;
use crate::rows::EventRow;
use crate::schema::{events, participants};

/// Adds a participant with the next sort rank.
///
/// The name is trimmed; an empty result is rejected before any write.
pub fn add_participant(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Participant, StoreError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyName.into());
    }

    let max_sort: Option<i32> = participants::table
        .select(max(participants::sort_order))
        .first(conn)?;
    let sort_order: i32 = max_sort.unwrap_or(0) + 1;

    diesel::insert_into(participants::table)
        .values((
            participants::name.eq(trimmed),
            participants::sort_order.eq(sort_order),
        ))
        .execute(conn)?;
    let participant_id: i64 = backend::last_insert_rowid(conn)?;

    info!(participant_id, name = trimmed, "Added participant");

    Ok(Participant {
        id: participant_id,
        name: trimmed.to_string(),
        sort_order,
    })
}

/// Deletes a participant and, via the cascade, all their events.
///
/// Idempotent; deleting an absent id is not an error.
pub fn delete_participant(conn: &mut SqliteConnection, id: i64) -> Result<(), StoreError> {
    let removed: usize =
        diesel::delete(participants::table.filter(participants::participant_id.eq(id)))
            .execute(conn)?;
    info!(participant_id = id, removed, "Deleted participant");
    Ok(())
}

/// Rewrites sort ranks from a full provided ordering.
///
/// Each listed id gets its position index as its rank; ids that do not
/// exist are silently ignored and unlisted participants keep their rank.
pub fn reorder_participants(
    conn: &mut SqliteConnection,
    ordered_ids: &[i64],
) -> Result<(), StoreError> {
    for (index, id) in ordered_ids.iter().enumerate() {
        let rank: i32 = i32::try_from(index).unwrap_or(i32::MAX);
        diesel::update(participants::table.filter(participants::participant_id.eq(id)))
            .set(participants::sort_order.eq(rank))
            .execute(conn)?;
    }
    info!(count = ordered_ids.len(), "Reordered participants");
    Ok(())
}

/// Creates an event after validating dates, owner, and non-overlap.
///
/// Rejected with `EndBeforeStart` when the range is inverted,
/// `UnknownParticipant` when the owner does not exist, and
/// `OverlappingEvent` when the inclusive range intersects any existing
/// event for the same participant. Nothing is written on rejection.
pub fn create_event(
    conn: &mut SqliteConnection,
    participant_id: i64,
    kind: EventKind,
    start: Date,
    end: Date,
) -> Result<Event, StoreError> {
    if end < start {
        return Err(DomainError::EndBeforeStart { start, end }.into());
    }

    let owner_exists: i64 = participants::table
        .filter(participants::participant_id.eq(participant_id))
        .count()
        .get_result(conn)?;
    if owner_exists == 0 {
        return Err(StoreError::UnknownParticipant(participant_id));
    }

    let start_text: String = format_date(start);
    let end_text: String = format_date(end);
    let overlapping: i64 = events::table
        .filter(events::participant_id.eq(participant_id))
        .filter(events::end_date.ge(&start_text))
        .filter(events::start_date.le(&end_text))
        .count()
        .get_result(conn)?;
    if overlapping > 0 {
        return Err(StoreError::OverlappingEvent {
            participant_id,
            start,
            end,
        });
    }

    diesel::insert_into(events::table)
        .values((
            events::participant_id.eq(participant_id),
            events::kind.eq(kind.as_str()),
            events::start_date.eq(&start_text),
            events::end_date.eq(&end_text),
        ))
        .execute(conn)?;
    let event_id: i64 = backend::last_insert_rowid(conn)?;

    // Re-select so the returned row carries the store-assigned timestamp.
    let row: EventRow = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn)?;

    info!(
        event_id,
        participant_id,
        kind = kind.as_str(),
        start = %start_text,
        end = %end_text,
        "Created event"
    );

    Event::try_from(row)
}

/// Deletes an event by id; idempotent.
pub fn delete_event(conn: &mut SqliteConnection, id: i64) -> Result<(), StoreError> {
    let removed: usize =
        diesel::delete(events::table.filter(events::event_id.eq(id))).execute(conn)?;
    debug!(event_id = id, removed, "Deleted event");
    Ok(())
}

/// Deletes every duty event whose start date falls inside the month.
///
/// Returns the number of rows removed. Used by the forced reassignment
/// path before a fresh run.
pub fn delete_duty_starts(
    conn: &mut SqliteConnection,
    span: &MonthSpan,
) -> Result<usize, StoreError> {
    let removed: usize = diesel::delete(
        events::table
            .filter(events::kind.eq(EventKind::Duty.as_str()))
            .filter(events::start_date.ge(format_date(span.first_day())))
            .filter(events::start_date.le(format_date(span.last_day()))),
    )
    .execute(conn)?;
    info!(removed, "Cleared duty events for reassignment");
    Ok(removed)
}
