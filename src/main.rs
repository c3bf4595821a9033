//! Tennis Abstract profile scraper
//!
//! Renders a player profile page in headless Chrome and saves the player
//! attributes and recent results as CSV.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tennis_profile_scraper::cli::{self, Cli};
use tennis_profile_scraper::config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tennis_profile_scraper=info,chromiumoxide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::debug!("Configuration loaded: {:?}", config);

    cli::run_scrape(cli.url, config).await
}
