mod constants;
mod fetch;
mod logging;
mod pipeline;
mod publish;
mod window;

use anyhow::Result;

use crate::fetch::HttpFeed;
use crate::publish::GitPublisher;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let feed = HttpFeed::new();
    let publisher = GitPublisher::new(".")?;
    pipeline::run(&feed, &publisher).await?;

    Ok(())
}
