//! Raw record → calendar event normalization.
//!
//! The feed writes the time of day as free text in a couple of Chinese
//! conventions ("9时5分", "14时", occasionally an ASCII "3h") or leaves it
//! empty for phenomena without a meaningful clock time. This module is the
//! only place that text is interpreted.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{AstroCalError, AstroCalResult};
use crate::event::{EventTime, PhenomenonEvent};
use crate::feed::RawPhenomenon;

/// Time-of-day granularity observed in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// No clock time; the phenomenon becomes an all-day entry.
    Unspecified,
    /// "H时" or "Hh": bare hour, minutes zero.
    Hour(u32),
    /// "H时M分": hour and minute.
    HourMinute { hour: u32, minute: u32 },
}

impl TimeOfDay {
    /// Parse the feed's time text. Anything that is neither empty nor one of
    /// the two known suffix conventions is out of contract and fails.
    pub fn parse(raw: &str) -> AstroCalResult<TimeOfDay> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(TimeOfDay::Unspecified);
        }
        if let Some(rest) = text.strip_suffix('分') {
            let (hour, minute) = rest
                .split_once('时')
                .ok_or_else(|| AstroCalError::TimeFormat(raw.to_string()))?;
            return Ok(TimeOfDay::HourMinute {
                hour: parse_component(hour, raw)?,
                minute: parse_component(minute, raw)?,
            });
        }
        if let Some(hour) = text.strip_suffix('时').or_else(|| text.strip_suffix('h')) {
            return Ok(TimeOfDay::Hour(parse_component(hour, raw)?));
        }
        Err(AstroCalError::TimeFormat(raw.to_string()))
    }

    /// Resolve against a date into the event's start value. Fails when the
    /// hour or minute falls outside the civil clock.
    pub fn on_date(self, date: NaiveDate) -> AstroCalResult<EventTime> {
        let (hour, minute) = match self {
            TimeOfDay::Unspecified => return Ok(EventTime::Date(date)),
            TimeOfDay::Hour(hour) => (hour, 0),
            TimeOfDay::HourMinute { hour, minute } => (hour, minute),
        };
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or(AstroCalError::TimeOutOfRange { hour, minute })?;
        Ok(EventTime::DateTime(date.and_time(time)))
    }
}

fn parse_component(text: &str, raw: &str) -> AstroCalResult<u32> {
    text.trim()
        .parse()
        .map_err(|_| AstroCalError::TimeFormat(raw.to_string()))
}

/// Build a [`PhenomenonEvent`] from one raw feed record.
pub fn normalize(record: &RawPhenomenon) -> AstroCalResult<PhenomenonEvent> {
    let date: NaiveDate = record
        .date
        .parse()
        .map_err(|e| AstroCalError::EventDate(record.date.clone(), e))?;
    let time = TimeOfDay::parse(record.time.as_deref().unwrap_or(""))?;
    let start = time.on_date(date)?;
    let description = record.summary.clone().filter(|summary| !summary.is_empty());
    Ok(PhenomenonEvent::new(
        record.astronomical_phenomena.clone(),
        start,
        description,
    ))
}
