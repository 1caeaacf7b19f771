// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-day availability resolution.
//!
//! This module reduces absence events to a per-participant set of blocked
//! dates within a target month. Which kind caused a block is not retained;
//! the scheduler only needs blocked or not.

use crate::dates::{MonthSpan, days_between};
use crate::types::Event;
use std::collections::HashSet;
use time::Date;

/// Dates on which participants are unavailable for duty within one month.
///
/// Rebuilt per assignment run; never persisted.
#[derive(Debug, Clone, Default)]
pub struct BlockingMap {
    blocked: HashSet<(i64, Date)>,
}

impl BlockingMap {
    /// Builds the map from events overlapping the span.
    ///
    /// Every day of every blocking event is marked for its owner, clipped to
    /// the span. Duty events never block and are skipped if present.
    #[must_use]
    pub fn build(events: &[Event], span: &MonthSpan) -> Self {
        let mut blocked: HashSet<(i64, Date)> = HashSet::new();
        for event in events {
            if !event.kind.is_blocking() {
                continue;
            }
            for day in days_between(event.start_date, event.end_date) {
                if span.contains(day) {
                    blocked.insert((event.participant_id, day));
                }
            }
        }
        Self { blocked }
    }

    /// Whether the participant is blocked on the given date.
    #[must_use]
    pub fn is_blocked(&self, participant_id: i64, date: Date) -> bool {
        self.blocked.contains(&(participant_id, date))
    }

    /// Total number of blocked (participant, date) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether no date is blocked for anyone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::EventKind;
    use time::macros::date;

    fn event(participant_id: i64, kind: EventKind, start: Date, end: Date) -> Event {
        Event {
            id: 0,
            participant_id,
            kind,
            start_date: start,
            end_date: end,
            created_at: None,
        }
    }

    fn february() -> MonthSpan {
        MonthSpan::new(2026, 2).unwrap()
    }

    #[test]
    fn test_every_day_of_an_absence_blocks() {
        let events: Vec<Event> = vec![event(
            1,
            EventKind::Vacation,
            date!(2026 - 02 - 10),
            date!(2026 - 02 - 12),
        )];
        let map: BlockingMap = BlockingMap::build(&events, &february());

        assert!(map.is_blocked(1, date!(2026 - 02 - 10)));
        assert!(map.is_blocked(1, date!(2026 - 02 - 11)));
        assert!(map.is_blocked(1, date!(2026 - 02 - 12)));
        assert!(!map.is_blocked(1, date!(2026 - 02 - 09)));
        assert!(!map.is_blocked(1, date!(2026 - 02 - 13)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_blocks_are_per_participant() {
        let events: Vec<Event> = vec![event(
            1,
            EventKind::Sick,
            date!(2026 - 02 - 05),
            date!(2026 - 02 - 05),
        )];
        let map: BlockingMap = BlockingMap::build(&events, &february());

        assert!(map.is_blocked(1, date!(2026 - 02 - 05)));
        assert!(!map.is_blocked(2, date!(2026 - 02 - 05)));
    }

    #[test]
    fn test_ranges_straddling_the_month_are_clipped() {
        let events: Vec<Event> = vec![event(
            1,
            EventKind::Trip,
            date!(2026 - 01 - 28),
            date!(2026 - 02 - 03),
        )];
        let map: BlockingMap = BlockingMap::build(&events, &february());

        assert!(!map.is_blocked(1, date!(2026 - 01 - 31)));
        assert!(map.is_blocked(1, date!(2026 - 02 - 01)));
        assert!(map.is_blocked(1, date!(2026 - 02 - 03)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_duty_events_never_block() {
        let events: Vec<Event> = vec![event(
            1,
            EventKind::Duty,
            date!(2026 - 02 - 05),
            date!(2026 - 02 - 05),
        )];
        let map: BlockingMap = BlockingMap::build(&events, &february());

        assert!(map.is_empty());
        assert!(!map.is_blocked(1, date!(2026 - 02 - 05)));
    }

    #[test]
    fn test_all_blocking_kinds_are_equivalent() {
        let events: Vec<Event> = vec![
            event(1, EventKind::Important, date!(2026 - 02 - 01), date!(2026 - 02 - 01)),
            event(2, EventKind::Vacation, date!(2026 - 02 - 01), date!(2026 - 02 - 01)),
            event(3, EventKind::Trip, date!(2026 - 02 - 01), date!(2026 - 02 - 01)),
            event(4, EventKind::Sick, date!(2026 - 02 - 01), date!(2026 - 02 - 01)),
        ];
        let map: BlockingMap = BlockingMap::build(&events, &february());

        for participant_id in 1..=4 {
            assert!(map.is_blocked(participant_id, date!(2026 - 02 - 01)));
        }
    }
}
