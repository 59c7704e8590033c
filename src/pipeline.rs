//! The fetch → normalize → render pipeline.

use anyhow::Result;
use astrocal_core::feed;
use astrocal_core::ics::{self, CalendarMeta};
use astrocal_core::normalize::normalize;
use astrocal_core::PhenomenonEvent;
use tracing::{debug, info};

use crate::constants::{CALENDAR_DESCRIPTION, CALENDAR_NAME, OUTPUT_FILE, START_YEAR};
use crate::fetch::FeedSource;
use crate::publish::{PublishOutcome, Publisher};
use crate::window::{end_year, month_windows};

/// What a run produced, for logging and for the publisher.
pub struct PipelineOutput {
    pub ics: Vec<u8>,
    pub months_queried: usize,
    pub months_without_data: usize,
    pub event_count: usize,
}

/// Walk the whole fetch window, render the calendar document, and hand it
/// to the publisher.
pub async fn run(source: &dyn FeedSource, publisher: &dyn Publisher) -> Result<PublishOutcome> {
    let output = run_window(source, START_YEAR, end_year()).await?;
    info!(
        months_queried = output.months_queried,
        months_without_data = output.months_without_data,
        events = output.event_count,
        "assembled calendar"
    );
    publish_output(publisher, &output).await
}

async fn publish_output(
    publisher: &dyn Publisher,
    output: &PipelineOutput,
) -> Result<PublishOutcome> {
    let outcome = publisher.publish(OUTPUT_FILE, &output.ics).await?;
    if outcome == PublishOutcome::Published {
        info!(
            file = OUTPUT_FILE,
            events = output.event_count,
            "calendar committed and pushed"
        );
    }
    Ok(outcome)
}

async fn run_window(
    source: &dyn FeedSource,
    start_year: i32,
    end_year: i32,
) -> Result<PipelineOutput> {
    let mut events: Vec<PhenomenonEvent> = Vec::new();
    let mut months_queried = 0;
    let mut months_without_data = 0;

    for (year, month) in month_windows(start_year, end_year) {
        let body = source.fetch_month(year, month).await?;
        months_queried += 1;

        if feed::is_no_data(&body) {
            debug!(year, month, "no phenomena published for this month");
            months_without_data += 1;
            continue;
        }

        let records = feed::parse_month(&body)?;
        debug!(year, month, count = records.len(), "decoded month records");
        for record in &records {
            events.push(normalize(record)?);
        }
    }

    let meta = CalendarMeta {
        name: CALENDAR_NAME.to_string(),
        description: CALENDAR_DESCRIPTION.to_string(),
    };
    let event_count = events.len();
    let ics = ics::render_calendar(&meta, &events).into_bytes();

    Ok(PipelineOutput {
        ics,
        months_queried,
        months_without_data,
        event_count,
    })
}
