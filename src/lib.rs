//! Tennis Abstract player profile scraper.
//!
//! Renders a profile page, pulls the player attributes out of the inline
//! script and the recent results out of `table#recent-results`, and writes
//! both as delimited files.

pub mod cli;
pub mod config;
pub mod output;
pub mod runner;
pub mod scraper;
