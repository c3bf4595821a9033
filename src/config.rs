//! Configuration for the profile scraper.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long to wait after navigation before the markup is captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WaitMode {
    /// Sleep for `settle_delay_secs`, no matter what the page does
    #[default]
    Fixed,
    /// Poll the page until the player data shows up, bounded by `ready_timeout_secs`
    Poll,
}

/// Browser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Chrome executable override
    #[serde(default)]
    pub chrome_path: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
    #[serde(default)]
    pub wait: WaitMode,
    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_settle_delay_secs() -> u64 {
    3
}

fn default_ready_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    250
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_path: None,
            user_agent: default_user_agent(),
            settle_delay_secs: default_settle_delay_secs(),
            wait: WaitMode::default(),
            ready_timeout_secs: default_ready_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl BrowserSettings {
    /// Chrome executable to launch, falling back to the platform default location
    pub fn chrome_executable(&self) -> String {
        if let Some(path) = &self.chrome_path {
            return path.clone();
        }

        if cfg!(target_os = "macos") {
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome".to_string()
        } else if cfg!(target_os = "windows") {
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe".to_string()
        } else {
            "google-chrome".to_string()
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_player_file")]
    pub player_file: String,
    #[serde(default = "default_history_file")]
    pub history_file: String,
    #[serde(default = "default_debug_file")]
    pub debug_file: String,
    /// Field delimiter for both CSV files
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_player_file() -> String {
    "player_data.csv".to_string()
}

fn default_history_file() -> String {
    "match_history.csv".to_string()
}

fn default_debug_file() -> String {
    "debug_render.html".to_string()
}

fn default_delimiter() -> char {
    ','
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            player_file: default_player_file(),
            history_file: default_history_file(),
            debug_file: default_debug_file(),
            delimiter: default_delimiter(),
        }
    }
}

impl OutputSettings {
    pub fn player_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.player_file)
    }

    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.history_file)
    }

    pub fn debug_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.debug_file)
    }

    /// Delimiter as the single byte the CSV writer expects
    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            anyhow::bail!("Delimiter must be a single ASCII character, got {:?}", self.delimiter)
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (TENNIS_SCRAPER_BROWSER__SETTLE_DELAY_SECS, etc.)
            .add_source(
                config::Environment::with_prefix("TENNIS_SCRAPER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
