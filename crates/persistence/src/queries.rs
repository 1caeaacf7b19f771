// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only event store queries.
//!
//! All range tests use the shared inclusive intersection predicate
//! `end_date >= range_start AND start_date <= range_end`, which is the
//! negation of "ends before it starts or starts after it ends".
//!
//! Weekday and absence aggregations load plain rows and fold in Rust rather
//! than reaching for SQL string functions; raw SQL stays confined to the
//! `backend` module.

use diesel::prelude::*;
use duty_rota_domain::{
    Event, EventKind, MonthSpan, Participant, days_between, format_date, parse_date,
    weekday_index,
};
use std::collections::{BTreeSet, HashMap};
use time::Date;

use crate::error::StoreError;
use crate::rows::{EventRow, ParticipantRow};
use crate::schema::{events, participants};

/// One participant's historical duty count on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayCount {
    /// The participant.
    pub participant_id: i64,
    /// Weekday index, Sunday=0..Saturday=6.
    pub weekday: u8,
    /// Number of duty events starting on that weekday.
    pub count: u32,
}

/// Vacation and sick day totals for one participant within one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbsenceTotals {
    /// Days covered by vacation events, clipped to the year.
    pub vacation_days: u32,
    /// Days covered by sick events, clipped to the year.
    pub sick_days: u32,
}

/// The roster plus every event overlapping one month.
#[derive(Debug, Clone)]
pub struct MonthSnapshot {
    /// Roster in display order.
    pub participants: Vec<Participant>,
    /// Events whose range intersects the month, in start-date order.
    pub events: Vec<Event>,
}

/// Lists the roster ordered by sort rank, then id.
pub fn list_participants(conn: &mut SqliteConnection) -> Result<Vec<Participant>, StoreError> {
    let rows: Vec<ParticipantRow> = participants::table
        .order((participants::sort_order.asc(), participants::participant_id.asc()))
        .select(ParticipantRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Participant::from).collect())
}

/// Returns events whose inclusive range intersects `[start, end]`.
///
/// Optionally restricted to one participant and optionally excluding one
/// kind (the engine queries with `exclude_kind = Duty` to gather blocking
/// events).
pub fn events_overlapping(
    conn: &mut SqliteConnection,
    participant: Option<i64>,
    exclude_kind: Option<EventKind>,
    start: Date,
    end: Date,
) -> Result<Vec<Event>, StoreError> {
    let start_text: String = format_date(start);
    let end_text: String = format_date(end);

    let mut query = events::table
        .into_boxed::<diesel::sqlite::Sqlite>()
        .filter(events::end_date.ge(start_text))
        .filter(events::start_date.le(end_text));
    if let Some(participant_id) = participant {
        query = query.filter(events::participant_id.eq(participant_id));
    }
    if let Some(kind) = exclude_kind {
        query = query.filter(events::kind.ne(kind.as_str()));
    }

    let rows: Vec<EventRow> = query
        .order((events::start_date.asc(), events::event_id.asc()))
        .select(EventRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Event::try_from).collect()
}

/// Returns the roster plus every event overlapping the month.
pub fn month_snapshot(
    conn: &mut SqliteConnection,
    span: &MonthSpan,
) -> Result<MonthSnapshot, StoreError> {
    Ok(MonthSnapshot {
        participants: list_participants(conn)?,
        events: events_overlapping(conn, None, None, span.first_day(), span.last_day())?,
    })
}

/// Counts duty events whose start date falls inside the month.
pub fn count_duty_starts(
    conn: &mut SqliteConnection,
    span: &MonthSpan,
) -> Result<i64, StoreError> {
    Ok(events::table
        .filter(events::kind.eq(EventKind::Duty.as_str()))
        .filter(events::start_date.ge(format_date(span.first_day())))
        .filter(events::start_date.le(format_date(span.last_day())))
        .count()
        .get_result(conn)?)
}

/// Counts duty events per participant and weekday for one year.
pub fn duty_weekday_counts(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<Vec<WeekdayCount>, StoreError> {
    let (year_start, year_end): (String, String) = year_bounds(year);
    let rows: Vec<(i64, String)> = events::table
        .filter(events::kind.eq(EventKind::Duty.as_str()))
        .filter(events::start_date.ge(year_start))
        .filter(events::start_date.le(year_end))
        .select((events::participant_id, events::start_date))
        .load(conn)?;

    let mut counts: HashMap<(i64, u8), u32> = HashMap::new();
    for (participant_id, start_text) in rows {
        let start: Date = parse_date(&start_text)
            .map_err(|_| StoreError::QueryFailed(format!("unreadable start_date '{start_text}'")))?;
        *counts
            .entry((participant_id, weekday_index(start)))
            .or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|((participant_id, weekday), count)| WeekdayCount {
            participant_id,
            weekday,
            count,
        })
        .collect())
}

/// Finds the most recent duty event starting strictly before `date`.
///
/// Used to seed consecutive-day avoidance across the month boundary.
pub fn last_duty_before(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<Option<(i64, Date)>, StoreError> {
    let row: Option<(i64, String)> = events::table
        .filter(events::kind.eq(EventKind::Duty.as_str()))
        .filter(events::start_date.lt(format_date(date)))
        .order((events::start_date.desc(), events::event_id.desc()))
        .select((events::participant_id, events::start_date))
        .first(conn)
        .optional()?;

    row.map(|(participant_id, start_text)| {
        let start: Date = parse_date(&start_text).map_err(|_| {
            StoreError::QueryFailed(format!("unreadable start_date '{start_text}'"))
        })?;
        Ok((participant_id, start))
    })
    .transpose()
}

/// Lists the distinct years that have any events, descending.
pub fn event_years(conn: &mut SqliteConnection) -> Result<Vec<i32>, StoreError> {
    let rows: Vec<String> = events::table.select(events::start_date).load(conn)?;
    let mut years: BTreeSet<i32> = BTreeSet::new();
    for start_text in rows {
        let start: Date = parse_date(&start_text)
            .map_err(|_| StoreError::QueryFailed(format!("unreadable start_date '{start_text}'")))?;
        years.insert(start.year());
    }
    Ok(years.into_iter().rev().collect())
}

/// Sums vacation and sick days per participant for one year.
///
/// Event ranges straddling the year boundary contribute only the days that
/// fall inside the year.
pub fn absence_days(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<HashMap<i64, AbsenceTotals>, StoreError> {
    let (year_start_text, year_end_text): (String, String) = year_bounds(year);
    let year_start: Date = parse_date(&year_start_text)?;
    let year_end: Date = parse_date(&year_end_text)?;

    let rows: Vec<EventRow> = events::table
        .filter(events::kind.eq_any([
            EventKind::Vacation.as_str(),
            EventKind::Sick.as_str(),
        ]))
        .filter(events::end_date.ge(&year_start_text))
        .filter(events::start_date.le(&year_end_text))
        .select(EventRow::as_select())
        .load(conn)?;

    let mut totals: HashMap<i64, AbsenceTotals> = HashMap::new();
    for row in rows {
        let event: Event = Event::try_from(row)?;
        let clipped_start: Date = event.start_date.max(year_start);
        let clipped_end: Date = event.end_date.min(year_end);
        let days: u32 =
            u32::try_from(days_between(clipped_start, clipped_end).count()).unwrap_or(0);
        let entry: &mut AbsenceTotals = totals.entry(event.participant_id).or_default();
        match event.kind {
            EventKind::Vacation => entry.vacation_days += days,
            EventKind::Sick => entry.sick_days += days,
            _ => {}
        }
    }
    Ok(totals)
}

fn year_bounds(year: i32) -> (String, String) {
    (format!("{year:04}-01-01"), format!("{year:04}-12-31"))
}
