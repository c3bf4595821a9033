//! CLI for tennis-scraper.

use clap::Parser;
use tracing::info;

use crate::config::AppConfig;
use crate::runner::Scrape;
use crate::scraper::{resolve_profile_url, Browser};

#[derive(Parser, Debug)]
#[command(name = "tennis-scraper")]
#[command(version, about = "Scrape a Tennis Abstract player profile into CSV files", long_about = None)]
pub struct Cli {
    /// Player profile URL on tennisabstract.com, or a bare player key such as NovakDjokovic
    #[arg(value_name = "URL")]
    pub url: String,
}

/// Scrape one profile page with a headless browser.
pub async fn run_scrape(url: String, config: AppConfig) -> anyhow::Result<()> {
    let url = resolve_profile_url(&url);

    let browser = Browser::launch(&config.browser).await?;
    let report = Scrape::new(config.output).run(browser, &url).await?;

    info!(
        "Done: {} file(s) written, {} warning(s)",
        report.files_written(),
        report.diagnostics.len()
    );
    for diagnostic in &report.diagnostics {
        info!("  - {}", diagnostic);
    }

    Ok(())
}
