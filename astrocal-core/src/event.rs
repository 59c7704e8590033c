//! Feed-neutral phenomenon event types.
//!
//! The normalizer converts raw feed records into these types, and the ICS
//! module serializes them without looking back at the feed.

use std::fmt;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timezone identifier attached to every timed event.
pub const CST_TZID: &str = "Asia/Shanghai";

/// China Standard Time: fixed +08:00, no DST rules.
pub fn cst_offset() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

/// When a phenomenon happens: a bare date, or a local CST date-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// An astronomical phenomenon as a calendar event.
///
/// Phenomena are moments, not intervals, so `end` always equals `start`;
/// [`PhenomenonEvent::new`] enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhenomenonEvent {
    pub name: String,
    pub start: EventTime,
    pub end: EventTime,
    pub description: Option<String>,
}

impl PhenomenonEvent {
    pub fn new(name: impl Into<String>, start: EventTime, description: Option<String>) -> Self {
        let end = start.clone();
        PhenomenonEvent {
            name: name.into(),
            start,
            end,
            description,
        }
    }

    /// Stable identifier derived from the start value and the name, so
    /// re-running the pipeline over unchanged feed data reproduces the
    /// same UID for the same phenomenon.
    pub fn uid(&self) -> String {
        format!("{}/{}/astrocal", self.start, self.name)
    }
}
