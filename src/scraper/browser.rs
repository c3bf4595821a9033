//! Browser automation using chromiumoxide.
//!
//! Tennis Abstract builds its player pages client side, so a plain HTTP
//! fetch only sees an empty shell. The page is loaded in headless Chrome
//! and the markup is captured once the scripts have had time to run.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chromiumoxide::browser::{Browser as ChromeBrowser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::{BrowserSettings, WaitMode};
use crate::scraper::parsers::{MATCH_HISTORY_TABLE_ID, PLAYER_SCRIPT_MARKER};

/// Something that can turn a URL into fully rendered markup.
///
/// `close` must be called exactly once when the caller is done, whatever
/// the outcome of `render`.
#[allow(async_fn_in_trait)]
pub trait PageRenderer {
    async fn render(&self, url: &str) -> Result<String>;

    async fn close(self) -> Result<()>;
}

/// How to decide the page has finished rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Unconditional sleep
    Fixed(Duration),
    /// Check the markup every `interval` until it is ready or `timeout` runs out
    Poll { timeout: Duration, interval: Duration },
}

impl WaitStrategy {
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        match settings.wait {
            WaitMode::Fixed => WaitStrategy::Fixed(settings.settle_delay()),
            WaitMode::Poll => WaitStrategy::Poll {
                timeout: settings.ready_timeout(),
                interval: settings.poll_interval(),
            },
        }
    }

    /// Wait according to the strategy.
    ///
    /// `snapshot` returns the current markup; it is only called when polling.
    /// Returns whether the markup was seen ready (always `true` for `Fixed`).
    pub async fn wait<F, Fut>(&self, mut snapshot: F) -> Result<bool>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        match *self {
            WaitStrategy::Fixed(delay) => {
                debug!("Waiting {:?} for scripts to settle", delay);
                sleep(delay).await;
                Ok(true)
            }
            WaitStrategy::Poll { timeout, interval } => {
                // No deadline when the timeout is too large to represent
                let deadline = Instant::now().checked_add(timeout);
                loop {
                    if markup_is_ready(&snapshot().await?) {
                        return Ok(true);
                    }
                    let out_of_time = match deadline {
                        Some(deadline) => Instant::now()
                            .checked_add(interval)
                            .map_or(true, |next| next > deadline),
                        None => false,
                    };
                    if out_of_time {
                        warn!("Page not ready after {:?}, using markup as is", timeout);
                        return Ok(false);
                    }
                    sleep(interval).await;
                }
            }
        }
    }
}

/// True once the player script or the results table is in the markup
pub fn markup_is_ready(html: &str) -> bool {
    html.contains(PLAYER_SCRIPT_MARKER) || html.contains(&format!("id=\"{}\"", MATCH_HISTORY_TABLE_ID))
}

/// Chrome command-line flags: headless, quiet, and not advertising automation
pub fn launch_args(settings: &BrowserSettings) -> Vec<String> {
    let mut args = vec![
        "--headless=new".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        format!("--user-agent={}", settings.user_agent),
    ];
    args.extend(
        [
            "--disable-gpu",
            "--disable-dev-shm-usage",
            "--no-first-run",
            "--no-default-browser-check",
            "--disable-extensions",
            "--disable-background-networking",
            "--disable-sync",
            "--mute-audio",
        ]
        .map(String::from),
    );
    args
}

/// Headless Chrome wrapper
pub struct Browser {
    browser: ChromeBrowser,
    handle: tokio::task::JoinHandle<()>,
    wait: WaitStrategy,
}

impl Browser {
    /// Launch a new headless browser instance
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let config = BrowserConfig::builder()
            .chrome_executable(settings.chrome_executable())
            .no_sandbox()
            .disable_default_args()
            .args(launch_args(settings))
            .window_size(1920, 1080)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = ChromeBrowser::launch(config)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to launch browser: {}", e))?;

        // Spawn handler task - must keep running for browser to work
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handle,
            wait: WaitStrategy::from_settings(settings),
        })
    }

    async fn fetch_page(&self, page: &Page) -> Result<String> {
        let ready = self
            .wait
            .wait(move || async move {
                page.content()
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to get page content: {}", e))
            })
            .await?;
        debug!("Page ready: {}", ready);

        page.content()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get page content: {}", e))
    }
}

impl PageRenderer for Browser {
    /// Fetch page content with JavaScript rendering
    async fn render(&self, url: &str) -> Result<String> {
        info!("Loading page: {}", url);
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", url, e))?;

        let html = self.fetch_page(&page).await;

        // Close the page
        let _ = page.close().await;

        html
    }

    /// Close the browser
    async fn close(mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            warn!("Browser did not close cleanly: {}", e);
            // CDP is gone, so waiting alone could block forever
            let _ = self.browser.kill().await;
        }
        let _ = self.browser.wait().await;
        self.handle.abort();
        Ok(())
    }
}
