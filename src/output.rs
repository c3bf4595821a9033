//! Delimited file output and the rendered-markup debug dump.

use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::scraper::parsers::{MatchHistory, PlayerAttributes};

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
    }
    Ok(())
}

fn csv_writer(path: &Path, delimiter: u8) -> Result<csv::Writer<std::fs::File>> {
    ensure_parent_dir(path)?;
    WriterBuilder::new()
        .delimiter(delimiter)
        // Table rows are written as the page has them, ragged or not
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))
}

/// Save the rendered markup so a failed extraction can be inspected later
pub fn write_debug_markup(path: &Path, markup: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, markup)
        .with_context(|| format!("Failed to write debug markup to {}", path.display()))
}

/// Write player attributes as a header row of field names and one value row
pub fn write_player_attributes(path: &Path, attrs: &PlayerAttributes, delimiter: u8) -> Result<()> {
    let mut wtr = csv_writer(path, delimiter)?;
    wtr.write_record(attrs.headers())?;
    wtr.write_record(attrs.values())?;
    wtr.flush()?;
    Ok(())
}

/// Write the match history header followed by every row in page order
pub fn write_match_history(path: &Path, history: &MatchHistory, delimiter: u8) -> Result<()> {
    let mut wtr = csv_writer(path, delimiter)?;
    wtr.write_record(&history.headers)?;
    for row in &history.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
