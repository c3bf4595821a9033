//! Recent results table parser.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::warn;

/// Element id of the recent results table
pub const MATCH_HISTORY_TABLE_ID: &str = "recent-results";

/// Why the recent results table could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchHistoryError {
    #[error("table #recent-results not found in page")]
    TableNotFound,
    #[error("table #recent-results has no <{0}> section")]
    MissingSection(&'static str),
    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Match history as laid out in the page: one header row, then body rows.
///
/// Rows are kept exactly as the page has them, including rows whose cell
/// count differs from the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchHistory {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MatchHistory {
    /// True unless there is both a header and at least one row
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// Parser for the recent results table
pub struct MatchHistoryParser;

impl MatchHistoryParser {
    /// Parse the table, degrading to an empty one.
    ///
    /// The failure, if any, is logged and handed back for reporting.
    pub fn parse_document(document: &Html) -> (MatchHistory, Option<MatchHistoryError>) {
        match Self::try_parse(document) {
            Ok(history) => (history, None),
            Err(e) => {
                warn!("Match history table unavailable: {}", e);
                (MatchHistory::default(), Some(e))
            }
        }
    }

    pub fn try_parse(document: &Html) -> Result<MatchHistory, MatchHistoryError> {
        let table_selector = selector(&format!("table#{}", MATCH_HISTORY_TABLE_ID))?;

        let table = document
            .select(&table_selector)
            .next()
            .ok_or(MatchHistoryError::TableNotFound)?;

        let thead = first_child_section(&table, "thead")?;
        let tbody = first_child_section(&table, "tbody")?;

        let th_selector = selector("th")?;
        let tr_selector = selector("tr")?;
        let td_selector = selector("td")?;

        let headers = thead.select(&th_selector).map(cell_text).collect();

        let rows = tbody
            .select(&tr_selector)
            .map(|row| row.select(&td_selector).map(cell_text).collect())
            .collect();

        Ok(MatchHistory { headers, rows })
    }
}

fn selector(css: &str) -> Result<Selector, MatchHistoryError> {
    Selector::parse(css).map_err(|e| MatchHistoryError::Selector(e.to_string()))
}

fn first_child_section<'a>(
    table: &ElementRef<'a>,
    section: &'static str,
) -> Result<ElementRef<'a>, MatchHistoryError> {
    let section_selector = selector(section)?;
    table
        .select(&section_selector)
        .next()
        .ok_or(MatchHistoryError::MissingSection(section))
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> MatchHistory {
        MatchHistoryParser::parse_document(&Html::parse_document(html)).0
    }

    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<table id="career-splits"><thead><tr><th>Split</th></tr></thead><tbody><tr><td>Hard</td></tr></tbody></table>
<table id="recent-results">
  <thead>
    <tr>
      <th> Date </th>
      <th>Tournament</th>
      <th>Result</th>
    </tr>
  </thead>
  <tbody>
    <tr><td>2024-01-01</td><td>
        Open X
    </td><td>6-4 6-3</td></tr>
    <tr><td>2023-12-10</td><td><a href="/t/y">Cup Y</a></td><td>7-6(5) 4-6 6-2</td></tr>
  </tbody>
</table>
</body>
</html>"#;

    #[test]
    fn test_parse_match_history() {
        let history = parse(SAMPLE_HTML);

        assert_eq!(history.headers, vec!["Date", "Tournament", "Result"]);
        assert_eq!(history.rows.len(), 2);
        assert_eq!(history.rows[0], vec!["2024-01-01", "Open X", "6-4 6-3"]);
        assert_eq!(history.rows[1], vec!["2023-12-10", "Cup Y", "7-6(5) 4-6 6-2"]);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_single_row_scenario() {
        let html = r#"<table id="recent-results">
            <thead><tr><th>Date</th><th>Tournament</th><th>Result</th></tr></thead>
            <tbody><tr><td>2024-01-01</td><td>Open X</td><td>6-4 6-3</td></tr></tbody>
        </table>"#;
        let history = parse(html);

        assert_eq!(history.headers, vec!["Date", "Tournament", "Result"]);
        assert_eq!(history.rows, vec![vec!["2024-01-01", "Open X", "6-4 6-3"]]);
    }

    #[test]
    fn test_ragged_rows_pass_through() {
        let html = r#"<table id="recent-results">
            <thead><tr><th>A</th><th>B</th></tr></thead>
            <tbody>
              <tr><td>1</td></tr>
              <tr><td>1</td><td>2</td><td>3</td></tr>
              <tr><th>only header cells</th></tr>
            </tbody>
        </table>"#;
        let history = parse(html);

        assert_eq!(history.rows.len(), 3);
        assert_eq!(history.rows[0], vec!["1"]);
        assert_eq!(history.rows[1], vec!["1", "2", "3"]);
        assert!(history.rows[2].is_empty());
    }

    #[test]
    fn test_table_not_found() {
        let document = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert_eq!(
            MatchHistoryParser::try_parse(&document),
            Err(MatchHistoryError::TableNotFound)
        );
        assert_eq!(
            MatchHistoryParser::parse_document(&document),
            (MatchHistory::default(), Some(MatchHistoryError::TableNotFound))
        );
    }

    #[test]
    fn test_missing_thead_degrades_to_empty() {
        let html = r#"<table id="recent-results"><tr><td>1</td></tr></table>"#;
        let document = Html::parse_document(html);

        assert_eq!(
            MatchHistoryParser::try_parse(&document),
            Err(MatchHistoryError::MissingSection("thead"))
        );

        let history = parse(html);
        assert!(history.headers.is_empty());
        assert!(history.rows.is_empty());
    }

    #[test]
    fn test_headers_without_rows_is_empty() {
        let html = r#"<table id="recent-results">
            <thead><tr><th>Date</th></tr></thead><tbody></tbody>
        </table>"#;
        let history = parse(html);

        assert_eq!(history.headers, vec!["Date"]);
        assert!(history.rows.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(
            parse(SAMPLE_HTML),
            parse(SAMPLE_HTML)
        );
    }
}
