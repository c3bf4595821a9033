//! Render, extract and write: one run against one profile page.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use scraper::Html;
use tracing::{info, warn};

use crate::config::OutputSettings;
use crate::output::{write_debug_markup, write_match_history, write_player_attributes};
use crate::scraper::parsers::{MatchHistoryError, MatchHistoryParser, PlayerParser};
use crate::scraper::PageRenderer;

/// Non-fatal problems met during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No script block carries the player variables
    PlayerScriptNotFound,
    /// The results table is missing or unreadable
    MatchHistoryUnavailable(MatchHistoryError),
    /// The results table has no header or no rows
    MatchHistoryEmpty,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PlayerScriptNotFound => write!(f, "player data not found"),
            Diagnostic::MatchHistoryUnavailable(e) => write!(f, "match history not found: {}", e),
            Diagnostic::MatchHistoryEmpty => write!(f, "match history table is empty"),
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub debug_file: PathBuf,
    pub player_file: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// Number of data files written (the debug dump is not counted)
    pub fn files_written(&self) -> usize {
        self.player_file.iter().count() + self.history_file.iter().count()
    }
}

/// A single scrape of one profile page
pub struct Scrape {
    output: OutputSettings,
}

impl Scrape {
    pub fn new(output: OutputSettings) -> Self {
        Self { output }
    }

    /// Render `url` and process the result.
    ///
    /// The renderer is closed on every path, including render and write failures.
    pub async fn run<R: PageRenderer>(&self, renderer: R, url: &str) -> Result<RunReport> {
        let result = match renderer.render(url).await {
            Ok(markup) => self.process_markup(&markup),
            Err(e) => Err(e),
        };

        if let Err(e) = renderer.close().await {
            warn!("Failed to release browser: {}", e);
        }

        // Fatal errors are reported once, by the caller
        result
    }

    /// Dump the markup, extract both results and write whichever are present
    pub fn process_markup(&self, markup: &str) -> Result<RunReport> {
        let delimiter = self.output.delimiter_byte()?;
        let mut report = RunReport {
            debug_file: self.output.debug_path(),
            ..Default::default()
        };

        write_debug_markup(&report.debug_file, markup)?;
        info!("Rendered markup saved to {}", report.debug_file.display());

        let document = Html::parse_document(markup);

        match PlayerParser::parse_document(&document) {
            Some(attrs) if !attrs.is_empty() => {
                info!("Player data: {}", attrs.display_name());
                let path = self.output.player_path();
                write_player_attributes(&path, &attrs, delimiter)?;
                info!("Player data saved to {}", path.display());
                report.player_file = Some(path);
            }
            Some(_) => {
                // Marker present but no field pattern matched
                info!("Player data: Unknown");
            }
            None => {
                warn!("Player data not found");
                report.diagnostics.push(Diagnostic::PlayerScriptNotFound);
            }
        }

        let (history, table_error) = MatchHistoryParser::parse_document(&document);
        if let Some(e) = table_error {
            report.diagnostics.push(Diagnostic::MatchHistoryUnavailable(e));
        }

        if !history.is_empty() {
            let path = self.output.history_path();
            write_match_history(&path, &history, delimiter)?;
            info!(
                "Match history saved to {} ({} rows)",
                path.display(),
                history.rows.len()
            );
            report.history_file = Some(path);
        } else {
            warn!(
                "Match history not found (check {})",
                report.debug_file.display()
            );
            if !report
                .diagnostics
                .iter()
                .any(|d| matches!(d, Diagnostic::MatchHistoryUnavailable(_)))
            {
                report.diagnostics.push(Diagnostic::MatchHistoryEmpty);
            }
        }

        Ok(report)
    }
}
