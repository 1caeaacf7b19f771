// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The day-by-day greedy assignment run.

use duty_rota_domain::{
    BlockingMap, DutyTally, Event, EventKind, MonthSpan, Participant, weekday_index,
};
use duty_rota_persistence::{EventStore, StoreError};
use time::Date;
use tracing::{debug, info};

use crate::tie_break::TieBreak;

/// The result of one assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// The month already has duties and the caller did not force a rerun.
    /// Nothing was read beyond the count and nothing was written.
    NeedsConfirm,
    /// There are no participants to assign.
    EmptyRoster,
    /// The run finished. Every day of the month is in exactly one of the
    /// two lists, both in ascending day order.
    Completed {
        /// The duty events created, one per assigned day.
        created: Vec<Event>,
        /// Days left unassigned because every participant was blocked.
        skipped: Vec<Date>,
    },
}

/// Assigns duties for every day of the given month.
///
/// Existing duties in the month make the run return
/// [`AssignmentOutcome::NeedsConfirm`] unless `force` is set, in which case
/// they are deleted and the month is reassigned from scratch. Months outside
/// 1..=12 are clamped.
///
/// Each day goes to the unblocked participant with the fewest duties on that
/// weekday this year, then the fewest duties overall, with `tie_break`
/// deciding among exact ties. The previous day's assignee is removed from
/// consideration unless that would leave nobody, in which case the
/// avoidance is waived and the day is still assigned. The lookback also
/// covers the last duty before the month starts.
///
/// Days where every participant is blocked are skipped, never aborted on.
///
/// # Errors
///
/// Returns an error if the month's first or last day is outside the
/// supported calendar range, or if any store operation fails. A storage
/// failure mid-run leaves the duties created so far in place.
pub fn auto_assign(
    store: &mut EventStore,
    year: i32,
    month: u8,
    force: bool,
    tie_break: TieBreak,
) -> Result<AssignmentOutcome, StoreError> {
    let span: MonthSpan = MonthSpan::new(year, month)?;

    let existing: i64 = store.count_duty_starts(&span)?;
    if existing > 0 {
        if !force {
            debug!(year, month, existing, "existing duties, confirmation required");
            return Ok(AssignmentOutcome::NeedsConfirm);
        }
        let removed: usize = store.delete_duty_starts(&span)?;
        info!(year, month, removed, "cleared existing duties for rerun");
    }

    let roster: Vec<Participant> = store.list_participants()?;
    if roster.is_empty() {
        return Ok(AssignmentOutcome::EmptyRoster);
    }

    let mut tally: DutyTally = DutyTally::new(&roster);
    for row in store.duty_weekday_counts(span.year())? {
        tally.load(row.participant_id, row.weekday, row.count);
    }

    let absences: Vec<Event> = store.events_overlapping(
        None,
        Some(EventKind::Duty),
        span.first_day(),
        span.last_day(),
    )?;
    let blocking: BlockingMap = BlockingMap::build(&absences, &span);

    let mut previous: Option<(i64, Date)> = store.last_duty_before(span.first_day())?;

    let mut created: Vec<Event> = Vec::with_capacity(usize::from(span.len_days()));
    let mut skipped: Vec<Date> = Vec::new();

    for day in span.days() {
        let mut candidates: Vec<i64> = roster
            .iter()
            .map(|participant| participant.id)
            .filter(|id| !blocking.is_blocked(*id, day))
            .collect();

        if candidates.is_empty() {
            debug!(%day, "everyone blocked, day skipped");
            skipped.push(day);
            continue;
        }

        // Avoid back-to-back days, but waive the rule rather than leave the
        // day unassigned when the previous assignee is the only candidate.
        if let Some((previous_id, previous_day)) = previous
            && previous_day.next_day() == Some(day)
            && candidates.len() > 1
        {
            candidates.retain(|id| *id != previous_id);
        }

        let weekday: u8 = weekday_index(day);
        candidates.sort_by_key(|id| tally.rank_key(*id, weekday));

        let Some(front_runner) = candidates.first().copied() else {
            skipped.push(day);
            continue;
        };
        let best_key: (u32, u32) = tally.rank_key(front_runner, weekday);
        let tied: Vec<i64> = candidates
            .iter()
            .copied()
            .take_while(|id| tally.rank_key(*id, weekday) == best_key)
            .collect();
        let selected: i64 = tie_break.pick(&tied).unwrap_or(front_runner);

        let event: Event = store.create_event(selected, EventKind::Duty, day, day)?;
        tally.record(selected, weekday);
        previous = Some((selected, day));
        created.push(event);
    }

    info!(
        year,
        month,
        assigned = created.len(),
        skipped = skipped.len(),
        "assignment run finished"
    );
    Ok(AssignmentOutcome::Completed { created, skipped })
}
