//! ICS document generation.
//!
//! This module renders the assembled phenomena into a single VCALENDAR
//! document according to RFC 5545.

mod generate;

pub use generate::render_calendar;

/// Metadata about the calendar (embedded in the .ics header)
#[derive(Debug, Clone)]
pub struct CalendarMeta {
    /// Human-readable calendar name (X-WR-CALNAME)
    pub name: String,
    /// Human-readable calendar description (X-WR-CALDESC)
    pub description: String,
}
