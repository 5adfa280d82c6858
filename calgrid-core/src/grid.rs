//! Month grid layout.
//!
//! A month is shown as six Sunday-first weeks. Days before the 1st and after
//! the last of the month are filled in from the adjacent months.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Cells in a month grid (6 weeks of 7 days).
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// The 42 days displayed for the month containing `date`.
pub fn days_for_month(date: NaiveDate) -> Vec<GridDay> {
    let first = first_of_month(date);
    let leading = first.weekday().num_days_from_sunday() as u64;
    let start = first.checked_sub_days(Days::new(leading)).unwrap_or(first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|day| GridDay {
            date: day,
            is_current_month: day.year() == first.year() && day.month() == first.month(),
        })
        .collect()
}
