// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and scheduling rules for the duty rota.
//!
//! This crate holds everything the scheduler needs that does not touch
//! storage: calendar math over month spans, the closed set of event kinds,
//! participant and event entities, the per-day blocking map derived from
//! absence events, and the fairness tally used to rank candidates.

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

mod availability;
mod dates;
mod error;
mod fairness;
mod types;

pub use availability::BlockingMap;
pub use dates::{MonthSpan, days_between, format_date, parse_date, weekday_index};
pub use error::DomainError;
pub use fairness::DutyTally;
pub use types::{Event, EventKind, Participant};
