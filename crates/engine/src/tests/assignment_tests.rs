// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_store_with_roster;
use crate::{AssignmentOutcome, TieBreak, auto_assign};
use duty_rota_domain::{Event, EventKind, MonthSpan};
use duty_rota_persistence::EventStore;
use std::collections::HashMap;
use time::Date;
use time::macros::date;

fn completed(outcome: AssignmentOutcome) -> (Vec<Event>, Vec<Date>) {
    match outcome {
        AssignmentOutcome::Completed { created, skipped } => (created, skipped),
        other => panic!("expected a completed run, got {other:?}"),
    }
}

fn totals_by_participant(created: &[Event]) -> HashMap<i64, u32> {
    let mut totals: HashMap<i64, u32> = HashMap::new();
    for event in created {
        *totals.entry(event.participant_id).or_insert(0) += 1;
    }
    totals
}

#[test]
fn test_full_month_is_covered_without_consecutive_repeats() {
    let (mut store, roster) = create_store_with_roster(&["Anna", "Boris", "Clara"]);

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    let (created, skipped) = completed(outcome);

    assert_eq!(created.len(), 28);
    assert!(skipped.is_empty());

    // One single-day duty per day, in day order.
    let span: MonthSpan = MonthSpan::new(2026, 2).unwrap();
    let days: Vec<Date> = span.days().collect();
    for (event, day) in created.iter().zip(&days) {
        assert_eq!(event.kind, EventKind::Duty);
        assert_eq!(event.start_date, *day);
        assert_eq!(event.end_date, *day);
    }

    // Nobody pulls back-to-back days when alternatives exist.
    for pair in created.windows(2) {
        assert_ne!(pair[0].participant_id, pair[1].participant_id);
    }

    // 28 days across three people lands at 10/9/9.
    let totals = totals_by_participant(&created);
    for participant in &roster {
        let total: u32 = totals[&participant.id];
        assert!((9..=10).contains(&total), "unbalanced total {total}");
    }
}

#[test]
fn test_leap_february_gets_twenty_nine_duties() {
    let (mut store, _roster) = create_store_with_roster(&["Anna", "Boris"]);

    let outcome = auto_assign(&mut store, 2028, 2, false, TieBreak::LowestId).unwrap();
    let (created, skipped) = completed(outcome);

    assert_eq!(created.len(), 29);
    assert!(skipped.is_empty());
    assert_eq!(created[28].start_date, date!(2028 - 02 - 29));
}

#[test]
fn test_absent_participant_is_never_assigned() {
    let (mut store, roster) = create_store_with_roster(&["Anna", "Boris", "Clara"]);
    store
        .create_event(
            roster[0].id,
            EventKind::Vacation,
            date!(2026 - 02 - 01),
            date!(2026 - 02 - 28),
        )
        .unwrap();

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    let (created, skipped) = completed(outcome);

    assert_eq!(created.len(), 28);
    assert!(skipped.is_empty());
    assert!(created.iter().all(|e| e.participant_id != roster[0].id));
}

#[test]
fn test_fully_blocked_day_is_skipped_not_fatal() {
    let (mut store, roster) = create_store_with_roster(&["Anna", "Boris"]);
    for participant in &roster {
        store
            .create_event(
                participant.id,
                EventKind::Important,
                date!(2026 - 02 - 15),
                date!(2026 - 02 - 15),
            )
            .unwrap();
    }

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    let (created, skipped) = completed(outcome);

    assert_eq!(skipped, vec![date!(2026 - 02 - 15)]);
    assert_eq!(created.len(), 27);
    assert!(created.iter().all(|e| e.start_date != date!(2026 - 02 - 15)));
}

#[test]
fn test_existing_duties_require_confirmation() {
    let (mut store, roster) = create_store_with_roster(&["Anna", "Boris"]);
    store
        .create_event(
            roster[0].id,
            EventKind::Duty,
            date!(2026 - 02 - 10),
            date!(2026 - 02 - 10),
        )
        .unwrap();

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    assert_eq!(outcome, AssignmentOutcome::NeedsConfirm);

    // Nothing was written or cleared.
    let span: MonthSpan = MonthSpan::new(2026, 2).unwrap();
    assert_eq!(store.count_duty_starts(&span).unwrap(), 1);
}

#[test]
fn test_force_clears_and_reassigns_the_month() {
    let (mut store, _roster) = create_store_with_roster(&["Anna", "Boris"]);
    let first = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    let (first_created, _) = completed(first);

    let rerun = auto_assign(&mut store, 2026, 2, true, TieBreak::LowestId).unwrap();
    let (rerun_created, rerun_skipped) = completed(rerun);

    assert_eq!(rerun_created.len(), 28);
    assert!(rerun_skipped.is_empty());

    let span: MonthSpan = MonthSpan::new(2026, 2).unwrap();
    assert_eq!(store.count_duty_starts(&span).unwrap(), 28);

    // The rerun produced fresh rows, not the originals.
    let old_ids: Vec<i64> = first_created.iter().map(|e| e.id).collect();
    assert!(rerun_created.iter().all(|e| !old_ids.contains(&e.id)));
}

#[test]
fn test_lone_participant_takes_consecutive_days() {
    let (mut store, roster) = create_store_with_roster(&["Anna"]);

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    let (created, skipped) = completed(outcome);

    // Avoidance is waived rather than leaving days empty.
    assert_eq!(created.len(), 28);
    assert!(skipped.is_empty());
    assert!(created.iter().all(|e| e.participant_id == roster[0].id));
}

#[test]
fn test_lookback_avoids_repeat_across_month_boundary() {
    let (mut store, roster) = create_store_with_roster(&["Anna", "Boris"]);
    // Equal history totals, so without the lookback the lowest id (Anna)
    // would take February 1st.
    store
        .create_event(
            roster[1].id,
            EventKind::Duty,
            date!(2026 - 01 - 15),
            date!(2026 - 01 - 15),
        )
        .unwrap();
    store
        .create_event(
            roster[0].id,
            EventKind::Duty,
            date!(2026 - 01 - 31),
            date!(2026 - 01 - 31),
        )
        .unwrap();

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    let (created, _) = completed(outcome);

    assert_eq!(created[0].start_date, date!(2026 - 02 - 01));
    assert_eq!(created[0].participant_id, roster[1].id);
}

#[test]
fn test_empty_roster_is_reported() {
    let mut store: EventStore = EventStore::new_in_memory().unwrap();

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::LowestId).unwrap();
    assert_eq!(outcome, AssignmentOutcome::EmptyRoster);
}

#[test]
fn test_out_of_range_month_is_clamped() {
    let (mut store, _roster) = create_store_with_roster(&["Anna", "Boris"]);

    let outcome = auto_assign(&mut store, 2026, 13, false, TieBreak::LowestId).unwrap();
    let (created, skipped) = completed(outcome);

    // Month 13 runs December.
    assert_eq!(created.len(), 31);
    assert!(skipped.is_empty());
    assert_eq!(created[0].start_date, date!(2026 - 12 - 01));
    assert_eq!(created[30].start_date, date!(2026 - 12 - 31));
}

#[test]
fn test_random_tie_break_still_covers_the_month() {
    let (mut store, roster) = create_store_with_roster(&["Anna", "Boris", "Clara"]);

    let outcome = auto_assign(&mut store, 2026, 2, false, TieBreak::Random).unwrap();
    let (created, skipped) = completed(outcome);

    assert_eq!(created.len(), 28);
    assert!(skipped.is_empty());
    for pair in created.windows(2) {
        assert_ne!(pair[0].participant_id, pair[1].participant_id);
    }
    // Whoever the coin picks, everyone ends up in the rotation.
    let totals = totals_by_participant(&created);
    assert_eq!(totals.len(), roster.len());
}
