use crate::instagram::InstagramFeed;
use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

/// Initialize and start the scheduler that keeps the Instagram feed warm
pub async fn start_scheduler(feed: Arc<InstagramFeed>, refresh_minutes: u64) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let cron_expr = refresh_cron(refresh_minutes)?;
    info!(
        "Scheduling Instagram refresh every {} minutes (cron: {})",
        refresh_minutes, cron_expr
    );

    let job = Job::new_async(cron_expr.as_str(), move |_uuid, _l| {
        let feed = Arc::clone(&feed);

        Box::pin(async move {
            info!("⏰ Instagram refresh triggered");
            let result = feed.refresh().await;
            if let Some(error) = result.error {
                warn!("Instagram refresh left the feed empty: {}", error);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    info!("✓ Scheduler started");

    Ok(scheduler)
}

/// Convert a refresh interval in minutes to a cron expression.
///
/// Cron format: "second minute hour day month day_of_week". Intervals must
/// divide evenly into an hour or a day to keep a regular cadence.
fn refresh_cron(minutes: u64) -> Result<String> {
    match minutes {
        0 => anyhow::bail!("Refresh interval must be at least one minute"),
        m if m < 60 && 60 % m == 0 => Ok(format!("0 */{} * * * *", m)),
        m if m % 60 == 0 && m <= 24 * 60 && (24 * 60) % m == 0 => {
            Ok(format!("0 0 */{} * * *", m / 60))
        }
        m => anyhow::bail!(
            "Invalid refresh interval: {} minutes. Use a divisor of 60, or whole hours dividing 24",
            m
        ),
    }
}
