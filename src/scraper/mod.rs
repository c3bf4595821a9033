//! Web scraper module for tennisabstract.com
//!
//! Provides browser automation and HTML parsing for player profile pages.

pub mod browser;
pub mod parsers;

pub use browser::{Browser, PageRenderer, WaitStrategy};

/// Base URL for tennisabstract.com
pub const BASE_URL: &str = "https://www.tennisabstract.com";

/// Build a player profile URL from the site's player key (e.g. `NovakDjokovic`)
pub fn player_url(player_key: &str) -> String {
    format!("{}/cgi-bin/player.cgi?p={}", BASE_URL, player_key)
}

/// Accept either a full profile URL or a bare player key
pub fn resolve_profile_url(target: &str) -> String {
    let target = target.trim();
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        player_url(target)
    }
}
