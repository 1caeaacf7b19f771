// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_store_with_roster;
use crate::{YearStatistics, yearly_statistics};
use duty_rota_domain::EventKind;
use duty_rota_persistence::EventStore;
use time::macros::date;

#[test]
fn test_weekday_counts_and_totals_per_participant() {
    let (mut store, roster) = create_store_with_roster(&["Anna", "Boris"]);
    // Anna: two Mondays and a Tuesday. Boris: one Sunday.
    for day in [
        date!(2026 - 02 - 02),
        date!(2026 - 02 - 09),
        date!(2026 - 02 - 03),
    ] {
        store
            .create_event(roster[0].id, EventKind::Duty, day, day)
            .unwrap();
    }
    store
        .create_event(
            roster[1].id,
            EventKind::Duty,
            date!(2026 - 02 - 01),
            date!(2026 - 02 - 01),
        )
        .unwrap();
    // A prior-year duty never shows up in this year's report.
    store
        .create_event(
            roster[0].id,
            EventKind::Duty,
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 01),
        )
        .unwrap();

    let report: YearStatistics = yearly_statistics(&mut store, 2026).unwrap();

    assert_eq!(report.year, 2026);
    assert_eq!(report.participants.len(), 2);

    let anna = &report.participants[0];
    assert_eq!(anna.name, "Anna");
    assert_eq!(anna.weekday_counts, [0, 2, 1, 0, 0, 0, 0]);
    assert_eq!(anna.total_duties, 3);

    let boris = &report.participants[1];
    assert_eq!(boris.weekday_counts, [1, 0, 0, 0, 0, 0, 0]);
    assert_eq!(boris.total_duties, 1);
}

#[test]
fn test_absences_straddling_the_year_are_clipped() {
    let (mut store, roster) = create_store_with_roster(&["Anna"]);
    store
        .create_event(
            roster[0].id,
            EventKind::Vacation,
            date!(2026 - 12 - 28),
            date!(2027 - 01 - 03),
        )
        .unwrap();
    store
        .create_event(
            roster[0].id,
            EventKind::Sick,
            date!(2026 - 03 - 09),
            date!(2026 - 03 - 13),
        )
        .unwrap();

    let report: YearStatistics = yearly_statistics(&mut store, 2026).unwrap();
    assert_eq!(report.participants[0].vacation_days, 4);
    assert_eq!(report.participants[0].sick_days, 5);

    let next: YearStatistics = yearly_statistics(&mut store, 2027).unwrap();
    assert_eq!(next.participants[0].vacation_days, 3);
    assert_eq!(next.participants[0].sick_days, 0);
}

#[test]
fn test_years_list_is_descending_and_includes_requested_year() {
    let (mut store, roster) = create_store_with_roster(&["Anna"]);
    for day in [date!(2024 - 05 - 01), date!(2026 - 05 - 01)] {
        store
            .create_event(roster[0].id, EventKind::Trip, day, day)
            .unwrap();
    }

    let report: YearStatistics = yearly_statistics(&mut store, 2025).unwrap();
    assert_eq!(report.years, vec![2026, 2025, 2024]);
}

#[test]
fn test_empty_store_reports_only_the_requested_year() {
    let mut store: EventStore = EventStore::new_in_memory().unwrap();

    let report: YearStatistics = yearly_statistics(&mut store, 2026).unwrap();
    assert!(report.participants.is_empty());
    assert_eq!(report.years, vec![2026]);
}

#[test]
fn test_report_serializes_for_transport() {
    let (mut store, roster) = create_store_with_roster(&["Anna"]);
    store
        .create_event(
            roster[0].id,
            EventKind::Duty,
            date!(2026 - 02 - 01),
            date!(2026 - 02 - 01),
        )
        .unwrap();

    let report: YearStatistics = yearly_statistics(&mut store, 2026).unwrap();
    let json: String = serde_json::to_string(&report).unwrap();

    assert!(json.contains("\"year\":2026"));
    assert!(json.contains("\"name\":\"Anna\""));
    assert!(json.contains("\"total_duties\":1"));
}
