//! JSON shapes exchanged between a front end and a running game session.

use poetle_core::{GameError, GuessOutcome, HintOutcome, RoundSnapshot, ScoreReport};
use serde::{Deserialize, Serialize};

pub use board::*;
pub use report::*;

mod board;
mod report;

/// How the next round's puzzle is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pick {
    #[default]
    Random,
    /// Today's puzzle, by the driver's local date.
    Daily,
    Index(usize),
}

/// A request from the front end, one per line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    NewRound {
        #[serde(default)]
        pick: Pick,
    },
    Guess {
        input: String,
    },
    Hint,
    Score,
    Save,
    Restore {
        snapshot: RoundSnapshot,
    },
    HighScores,
}

/// Everything the session reports back, one per line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    RoundStarted {
        board: BoardView,
    },
    Guessed {
        outcome: GuessOutcome,
        board: BoardView,
    },
    Hinted {
        outcome: HintOutcome,
        board: BoardView,
    },
    Score {
        report: ScoreReport,
        elapsed: String,
    },
    Saved {
        snapshot: RoundSnapshot,
    },
    Restored {
        board: BoardView,
    },
    RoundOver {
        report: SessionReport,
    },
    HighScores {
        entries: Vec<HighScoreEntry>,
    },
    Rejected {
        kind: String,
        message: String,
    },
}

impl From<GameError> for Event {
    fn from(err: GameError) -> Self {
        Self::Rejected {
            kind: err.kind().into(),
            message: err.to_string(),
        }
    }
}

impl Command {
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

impl Event {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
