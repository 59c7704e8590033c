//! Fetch-window enumeration.

use astrocal_core::cst_offset;
use chrono::{Datelike, Utc};

use crate::constants::LOOKAHEAD_YEARS;

/// All (year, month) pairs from `start_year` through `end_year` inclusive,
/// in ascending order.
pub fn month_windows(start_year: i32, end_year: i32) -> impl Iterator<Item = (i32, u32)> {
    (start_year..=end_year).flat_map(|year| (1..=12).map(move |month| (year, month)))
}

/// The last year to query: the current year on the CST clock plus the
/// lookahead, so phenomena the museum publishes ahead of time are picked up
/// early.
pub fn end_year() -> i32 {
    Utc::now().with_timezone(&cst_offset()).year() + LOOKAHEAD_YEARS
}
