// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duty assignment engine and yearly statistics.
//!
//! The engine walks one calendar month day by day and assigns a duty to the
//! available participant with the fewest duties on that weekday, breaking
//! ties by total count and then by an injectable tie-break rule. It never
//! overwrites existing duties unless the caller forces a rerun, and it
//! treats days with nobody available as skips rather than failures.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod assign;
mod statistics;
mod tie_break;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

pub use assign::{AssignmentOutcome, auto_assign};
pub use statistics::{ParticipantYearStats, YearStatistics, yearly_statistics};
pub use tie_break::TieBreak;
