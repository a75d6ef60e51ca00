//! Game state and scoring for guessing a hidden Chinese poem one character at
//! a time.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use charset::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use puzzle::*;
pub use round::*;
pub use score::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod charset;
mod clock;
mod engine;
mod error;
mod puzzle;
mod round;
mod score;
mod snapshot;
mod types;

/// Rule switches that vary between deployments of the game.
///
/// There is no switch for hints and the perfect clear: hinted cells are never
/// guessed, so a round that used a hint cannot be a perfect clear.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Hints allowed per round, `None` for no limit. Every hint is penalized
    /// either way.
    pub max_hints: Option<Count>,
}

impl RulesConfig {
    pub const fn new(max_hints: Option<Count>) -> Self {
        Self { max_hints }
    }
}

/// Result of an accepted guess. `success` tells whether the character was in
/// the poem; rejected guesses never produce one of these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub character: char,
    pub success: bool,
    pub message: String,
    pub found_positions: Vec<CellIndex>,
    pub found_count: usize,
    pub consecutive_hits: Count,
    pub title_complete: bool,
    pub game_complete: bool,
    pub score: ScoreReport,
}

/// Result of a hint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintOutcome {
    pub character: char,
    pub message: String,
    pub revealed_positions: Vec<CellIndex>,
    pub hint_count: Count,
    pub game_complete: bool,
    pub score: ScoreReport,
}
