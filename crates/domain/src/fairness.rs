// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fairness tracking for duty distribution.
//!
//! The tally counts historical duty assignments per participant, broken out
//! by weekday (Sunday=0..Saturday=6) and in total. It is rebuilt from the
//! store at the start of an assignment run and updated in memory as the run
//! makes decisions, so each day's ranking reflects the assignments already
//! made within the same run.

use crate::types::Participant;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    weekday: [u32; 7],
    total: u32,
}

/// Per-participant duty counts used to rank candidates.
///
/// Owned by a single assignment run; two runs never share a tally.
#[derive(Debug, Clone, Default)]
pub struct DutyTally {
    counts: HashMap<i64, Counts>,
}

impl DutyTally {
    /// Creates a tally with every roster member at zero.
    ///
    /// Seeding everyone up front makes brand-new participants immediately
    /// eligible without skew.
    #[must_use]
    pub fn new(roster: &[Participant]) -> Self {
        let counts: HashMap<i64, Counts> = roster
            .iter()
            .map(|participant| (participant.id, Counts::default()))
            .collect();
        Self { counts }
    }

    /// Applies a historical count for one participant and weekday.
    ///
    /// Counts for participants no longer on the roster are ignored; they can
    /// never be candidates.
    pub fn load(&mut self, participant_id: i64, weekday: u8, count: u32) {
        if let Some(counts) = self.counts.get_mut(&participant_id)
            && let Some(slot) = counts.weekday.get_mut(usize::from(weekday))
        {
            *slot += count;
            counts.total += count;
        }
    }

    /// Records one new assignment made during the current run.
    pub fn record(&mut self, participant_id: i64, weekday: u8) {
        self.load(participant_id, weekday, 1);
    }

    /// The ascending ranking key for a candidate on the given weekday.
    ///
    /// Candidates compare first by their count for this weekday, then by
    /// their total; lower is preferred. Unknown participants rank as zero.
    #[must_use]
    pub fn rank_key(&self, participant_id: i64, weekday: u8) -> (u32, u32) {
        self.counts.get(&participant_id).map_or((0, 0), |counts| {
            let weekday_count: u32 = counts
                .weekday
                .get(usize::from(weekday))
                .copied()
                .unwrap_or(0);
            (weekday_count, counts.total)
        })
    }

    /// The seven weekday counts for a participant, Sunday first.
    #[must_use]
    pub fn weekday_counts(&self, participant_id: i64) -> [u32; 7] {
        self.counts
            .get(&participant_id)
            .map_or([0; 7], |counts| counts.weekday)
    }

    /// The total duty count for a participant.
    #[must_use]
    pub fn total(&self, participant_id: i64) -> u32 {
        self.counts.get(&participant_id).map_or(0, |counts| counts.total)
    }
}
