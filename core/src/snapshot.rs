use serde::{Deserialize, Serialize};

use crate::*;

/// Saved progress of a round, keyed by the puzzle title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundSnapshot {
    pub puzzle_title: String,
    pub cells: Vec<RevealCell>,
    pub guessed: Vec<char>,
    pub guess_count: Count,
    pub correct_guesses: Count,
    pub wrong_guesses: Count,
    pub consecutive_hits: Count,
    pub max_consecutive_hits: Count,
    pub hint_count: Count,
    pub start_time_ms: TimestampMs,
    pub end_time_ms: TimestampMs,
    /// Score at save time, informational; it is recomputed after restoring.
    pub score: u32,
    pub won: bool,
    pub title_notified: bool,
}

impl RoundSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
