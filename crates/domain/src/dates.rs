// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date helpers.
//!
//! Dates are date-only (no time, no timezone) and travel as `YYYY-MM-DD`
//! text at the storage boundary, where lexicographic order matches
//! chronological order.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month};

/// The `YYYY-MM-DD` format used for all persisted dates.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string is malformed or does not
/// name a real calendar date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|_| DomainError::InvalidDate(value.to_string()))
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Returns the weekday index for a date, Sunday=0 through Saturday=6.
#[must_use]
pub fn weekday_index(date: Date) -> u8 {
    date.weekday().number_days_from_sunday()
}

/// Iterates every date from `start` through `end` inclusive.
///
/// Yields nothing when `end` precedes `start`.
pub fn days_between(start: Date, end: Date) -> impl Iterator<Item = Date> {
    std::iter::successors((start <= end).then_some(start), move |day| {
        day.next_day().filter(|next| *next <= end)
    })
}

/// An inclusive calendar month, the scope of one assignment run.
///
/// Month values outside 1..=12 are clamped rather than rejected; this is an
/// internal scheduling utility, not an input-validation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    first: Date,
    last: Date,
}

impl MonthSpan {
    /// Creates the span covering the given month of the given year.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` if the year is outside the range
    /// the calendar supports.
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        let clamped: u8 = month.clamp(1, 12);
        let month: Month = Month::try_from(clamped)
            .map_err(|_| DomainError::InvalidDate(format!("{year:04}-{clamped:02}")))?;
        let first: Date = Date::from_calendar_date(year, month, 1)
            .map_err(|_| DomainError::InvalidDate(format!("{year:04}-{clamped:02}-01")))?;
        let length: u8 = month.length(year);
        let last: Date = Date::from_calendar_date(year, month, length)
            .map_err(|_| DomainError::InvalidDate(format!("{year:04}-{clamped:02}-{length:02}")))?;
        Ok(Self { first, last })
    }

    /// The first day of the month.
    #[must_use]
    pub const fn first_day(&self) -> Date {
        self.first
    }

    /// The last day of the month, leap-year aware.
    #[must_use]
    pub const fn last_day(&self) -> Date {
        self.last
    }

    /// The year this span lies in.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.first.year()
    }

    /// The number of days in the month.
    #[must_use]
    pub const fn len_days(&self) -> u8 {
        self.last.day()
    }

    /// Whether the given date falls inside this month.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.first && date <= self.last
    }

    /// Iterates every day of the month in ascending order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let first: Date = self.first;
        (0..self.len_days()).map(move |offset| first + Duration::days(i64::from(offset)))
    }
}
