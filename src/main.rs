use anyhow::Result;
use euromotors_web::availability::SystemClock;
use euromotors_web::config::Config;
use euromotors_web::server::{self, AppState};
use euromotors_web::scheduler;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("euromotors_web=info".parse()?),
        )
        .init();

    info!("Starting EURO MOTORS web service");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Business timezone {}, availability refresh every {}s",
        config.business_timezone, config.availability_refresh_secs
    );

    let refresh_minutes = config.instagram_refresh_minutes;
    let state = Arc::new(AppState::build(config, Arc::new(SystemClock))?);

    // Keep the scheduler alive for the lifetime of the server
    let _scheduler = scheduler::start_scheduler(Arc::clone(&state.instagram), refresh_minutes).await?;

    server::serve(state).await
}
