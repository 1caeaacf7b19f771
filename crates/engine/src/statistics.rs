// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Yearly duty and absence statistics.

use duty_rota_domain::{DutyTally, Participant};
use duty_rota_persistence::{AbsenceTotals, EventStore, StoreError};
use serde::Serialize;
use std::collections::HashMap;

/// One participant's numbers for a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantYearStats {
    /// The participant.
    pub participant_id: i64,
    /// Display name.
    pub name: String,
    /// Duty counts per weekday, Sunday first.
    pub weekday_counts: [u32; 7],
    /// Total duties in the year.
    pub total_duties: u32,
    /// Vacation days falling inside the year.
    pub vacation_days: u32,
    /// Sick days falling inside the year.
    pub sick_days: u32,
}

/// The full statistics report for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearStatistics {
    /// The year the report covers.
    pub year: i32,
    /// One entry per roster member, in display order.
    pub participants: Vec<ParticipantYearStats>,
    /// Every year that has events, descending, always including `year`.
    pub years: Vec<i32>,
}

/// Builds the statistics report for one year. Pure read, no writes.
///
/// # Errors
///
/// Returns an error if any store query fails.
pub fn yearly_statistics(store: &mut EventStore, year: i32) -> Result<YearStatistics, StoreError> {
    let roster: Vec<Participant> = store.list_participants()?;

    let mut tally: DutyTally = DutyTally::new(&roster);
    for row in store.duty_weekday_counts(year)? {
        tally.load(row.participant_id, row.weekday, row.count);
    }

    let absences: HashMap<i64, AbsenceTotals> = store.absence_days(year)?;

    let participants: Vec<ParticipantYearStats> = roster
        .into_iter()
        .map(|participant| {
            let totals: AbsenceTotals =
                absences.get(&participant.id).copied().unwrap_or_default();
            ParticipantYearStats {
                weekday_counts: tally.weekday_counts(participant.id),
                total_duties: tally.total(participant.id),
                vacation_days: totals.vacation_days,
                sick_days: totals.sick_days,
                participant_id: participant.id,
                name: participant.name,
            }
        })
        .collect();

    let mut years: Vec<i32> = store.event_years()?;
    if !years.contains(&year) {
        years.push(year);
        years.sort_unstable_by(|a, b| b.cmp(a));
    }

    Ok(YearStatistics {
        year,
        participants,
        years,
    })
}
