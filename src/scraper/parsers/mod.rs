//! HTML parsers for Tennis Abstract player pages.

pub mod match_history;
pub mod player;

pub use match_history::{MatchHistory, MatchHistoryError, MatchHistoryParser, MATCH_HISTORY_TABLE_ID};
pub use player::{PlayerAttributes, PlayerField, PlayerParser, PLAYER_SCRIPT_MARKER};
