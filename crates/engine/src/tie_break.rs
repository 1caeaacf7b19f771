// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tie-break rules for equally ranked candidates.

use rand::Rng;

/// How to choose among candidates whose ranking keys are equal.
///
/// Random is the default so long-run distribution stays even; `LowestId`
/// makes runs reproducible for callers that need determinism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Pick uniformly at random among the tied candidates.
    #[default]
    Random,
    /// Pick the tied candidate with the lowest participant id.
    LowestId,
}

impl TieBreak {
    /// Picks one id from the tied candidates, or `None` if the slice is
    /// empty.
    #[must_use]
    pub fn pick(self, tied: &[i64]) -> Option<i64> {
        match self {
            Self::LowestId => tied.iter().copied().min(),
            Self::Random => {
                if tied.is_empty() {
                    None
                } else {
                    let index: usize = rand::rng().random_range(0..tied.len());
                    tied.get(index).copied()
                }
            }
        }
    }
}
