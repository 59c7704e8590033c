//! Upstream feed payload decoding.
//!
//! The museum API answers one JSON document per (year, month) query. Months
//! without phenomena answer with the literal body `null` plus a newline
//! instead of a document; callers check [`is_no_data`] before parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AstroCalError, AstroCalResult};

/// True when the response body is the documented "no data for this month"
/// sentinel.
pub fn is_no_data(body: &str) -> bool {
    body.trim() == "null"
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    result: FeedResult,
}

#[derive(Debug, Deserialize)]
struct FeedResult {
    aps: Vec<Value>,
}

/// One per-day record exactly as the feed delivers it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPhenomenon {
    #[serde(rename = "astronomicalPhenomena")]
    pub astronomical_phenomena: String,
    pub date: String,
    pub time: Option<String>,
    pub summary: Option<String>,
}

/// Extract the per-day records from a month payload.
///
/// The records live at the fixed path `result.aps[1]`; any other shape is a
/// broken contract with the feed and fails the run.
pub fn parse_month(body: &str) -> AstroCalResult<Vec<RawPhenomenon>> {
    let response: FeedResponse = serde_json::from_str(body)?;
    let records = response
        .result
        .aps
        .into_iter()
        .nth(1)
        .ok_or_else(|| AstroCalError::PayloadShape("result.aps has no second entry".to_string()))?;
    serde_json::from_value(records).map_err(|e| {
        AstroCalError::PayloadShape(format!("result.aps[1] is not a record list: {}", e))
    })
}
