//! Player attribute parser for Tennis Abstract profile pages.
//!
//! The profile page does not render its attributes as markup. They are
//! embedded in an inline script as `var <name> = <value>;` assignments,
//! so the parser finds that script and runs one pattern per field over it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

/// Token that identifies the script block carrying the player variables
pub const PLAYER_SCRIPT_MARKER: &str = "var fullname";

/// Player attribute fields, in output column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerField {
    FullName,
    CurrentRank,
    PeakRank,
    DateOfBirth,
    Height,
    Country,
    EloRating,
}

impl PlayerField {
    /// Script variable name, also used as the CSV column name
    pub fn key(&self) -> &'static str {
        match self {
            PlayerField::FullName => "fullname",
            PlayerField::CurrentRank => "currentrank",
            PlayerField::PeakRank => "peakrank",
            PlayerField::DateOfBirth => "dob",
            PlayerField::Height => "ht",
            PlayerField::Country => "country",
            PlayerField::EloRating => "elo_rating",
        }
    }
}

/// Shape of the right-hand side of a `var` assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// `'anything'`, up to the first `';`
    Quoted,
    /// `1234`
    Digits,
    /// `'1234'`
    QuotedDigits,
}

impl ValueShape {
    fn capture(&self) -> &'static str {
        match self {
            ValueShape::Quoted => r"'(.*?)'",
            ValueShape::Digits => r"(\d+)",
            ValueShape::QuotedDigits => r"'(\d+)'",
        }
    }
}

/// Every field and the value shape the page uses for it
pub const FIELD_PATTERNS: [(PlayerField, ValueShape); 7] = [
    (PlayerField::FullName, ValueShape::Quoted),
    (PlayerField::CurrentRank, ValueShape::Digits),
    (PlayerField::PeakRank, ValueShape::Digits),
    (PlayerField::DateOfBirth, ValueShape::Digits),
    (PlayerField::Height, ValueShape::Digits),
    (PlayerField::Country, ValueShape::Quoted),
    (PlayerField::EloRating, ValueShape::QuotedDigits),
];

static FIELD_REGEXES: LazyLock<Vec<(PlayerField, Regex)>> = LazyLock::new(|| {
    FIELD_PATTERNS
        .iter()
        .map(|(field, shape)| {
            let pattern = format!(
                r"var {} = {};",
                regex::escape(field.key()),
                shape.capture()
            );
            let re = Regex::new(&pattern).expect("field patterns are valid regexes");
            (*field, re)
        })
        .collect()
});

/// Raw player attributes as captured from the page script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerAttributes {
    fields: BTreeMap<PlayerField, String>,
}

impl PlayerAttributes {
    pub fn get(&self, field: PlayerField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Column names of the captured fields
    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.keys().map(PlayerField::key).collect()
    }

    /// Captured values, aligned with [`headers`](Self::headers)
    pub fn values(&self) -> Vec<&str> {
        self.fields.values().map(String::as_str).collect()
    }

    /// Player name for status messages
    pub fn display_name(&self) -> &str {
        self.get(PlayerField::FullName).unwrap_or("Unknown")
    }
}

/// Parser for the player attribute script
pub struct PlayerParser;

impl PlayerParser {
    /// Parse player attributes from a rendered page.
    ///
    /// Returns `None` when no script block carries the player variables.
    pub fn parse_document(document: &Html) -> Option<PlayerAttributes> {
        Self::find_player_script(document).map(|script| Self::parse_script(&script))
    }

    /// Text of the first inline script containing [`PLAYER_SCRIPT_MARKER`]
    pub fn find_player_script(document: &Html) -> Option<String> {
        let selector = Selector::parse("script").ok()?;

        document
            .select(&selector)
            .map(|script| script.text().collect::<String>())
            .find(|text| text.contains(PLAYER_SCRIPT_MARKER))
    }

    /// Apply every field pattern to the script text.
    ///
    /// Fields are matched independently; a missing assignment just leaves
    /// the field out.
    pub fn parse_script(script: &str) -> PlayerAttributes {
        let fields = FIELD_REGEXES
            .iter()
            .filter_map(|(field, re)| {
                re.captures(script)
                    .map(|caps| (*field, caps[1].to_string()))
            })
            .collect();

        PlayerAttributes { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Option<PlayerAttributes> {
        PlayerParser::parse_document(&Html::parse_document(html))
    }

    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<script src="/jquery.js"></script>
<script>var unrelated = 1;</script>
<script>
var fullname = 'Novak Djokovic';
var lastname = 'Djokovic';
var currentrank = 4;
var peakrank = 1;
var dob = 19870522;
var ht = 188;
var hand = 'R';
var country = 'SRB';
var elo_rating = '2150';
</script>
</head>
<body><h1>Player</h1></body>
</html>"#;

    #[test]
    fn test_parse_all_fields() {
        let attrs = parse(SAMPLE_HTML).unwrap();

        assert_eq!(attrs.len(), 7);
        assert_eq!(attrs.get(PlayerField::FullName), Some("Novak Djokovic"));
        assert_eq!(attrs.get(PlayerField::CurrentRank), Some("4"));
        assert_eq!(attrs.get(PlayerField::PeakRank), Some("1"));
        assert_eq!(attrs.get(PlayerField::DateOfBirth), Some("19870522"));
        assert_eq!(attrs.get(PlayerField::Height), Some("188"));
        assert_eq!(attrs.get(PlayerField::Country), Some("SRB"));
        assert_eq!(attrs.get(PlayerField::EloRating), Some("2150"));
    }

    #[test]
    fn test_headers_follow_field_order() {
        let attrs = parse(SAMPLE_HTML).unwrap();
        assert_eq!(
            attrs.headers(),
            vec!["fullname", "currentrank", "peakrank", "dob", "ht", "country", "elo_rating"]
        );
        assert_eq!(attrs.values()[0], "Novak Djokovic");
    }

    #[test]
    fn test_partial_script() {
        let attrs = PlayerParser::parse_script("var fullname = 'John Smith'; var currentrank = 12;");

        let collected: Vec<_> = attrs.iter().collect();
        assert_eq!(
            collected,
            vec![
                (PlayerField::FullName, "John Smith"),
                (PlayerField::CurrentRank, "12"),
            ]
        );
    }

    #[test]
    fn test_missing_field_does_not_affect_others() {
        let script = "var fullname = 'Jane Doe'; var peakrank = 3; var country = 'USA';";
        let attrs = PlayerParser::parse_script(script);

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get(PlayerField::CurrentRank), None);
        assert_eq!(attrs.get(PlayerField::EloRating), None);
        assert_eq!(attrs.get(PlayerField::Country), Some("USA"));
    }

    #[test]
    fn test_value_shape_mismatch_is_omitted() {
        // Rank quoted, rating bare: neither matches its declared shape
        let script = "var fullname = 'A B'; var currentrank = '12'; var elo_rating = 2000;";
        let attrs = PlayerParser::parse_script(script);

        assert_eq!(attrs.get(PlayerField::CurrentRank), None);
        assert_eq!(attrs.get(PlayerField::EloRating), None);
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_quoted_value_kept_raw() {
        let attrs = PlayerParser::parse_script(r"var fullname = 'Jo-Wilfried Tsonga &amp; co';");
        assert_eq!(
            attrs.get(PlayerField::FullName),
            Some("Jo-Wilfried Tsonga &amp; co")
        );
    }

    #[test]
    fn test_no_marker_returns_none() {
        let html = "<html><head><script>var currentrank = 5;</script></head></html>";
        assert!(parse(html).is_none());
        assert!(parse("<html></html>").is_none());
    }

    #[test]
    fn test_display_name() {
        let attrs = PlayerParser::parse_script("var fullname = 'John Smith';");
        assert_eq!(attrs.display_name(), "John Smith");

        let attrs = PlayerParser::parse_script("var currentrank = 12;");
        assert_eq!(attrs.display_name(), "Unknown");
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse(SAMPLE_HTML), parse(SAMPLE_HTML));
    }
}
