use thiserror::Error;

/// Every way a round operation can be refused. None of these are fatal and
/// none of them leave the round modified.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No puzzle available")]
    NoPuzzleAvailable,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyOver,
    #[error("Please enter a Chinese character")]
    EmptyInput,
    #[error("Input must be exactly one Chinese character")]
    NotChinese,
    #[error("Character was already guessed")]
    AlreadyGuessed,
    #[error("No hidden characters left to hint")]
    NoHiddenCharacters,
    #[error("Hint limit reached for this round")]
    HintLimitReached,
    #[error("Snapshot does not belong to the active puzzle")]
    SnapshotMismatch,
}

impl GameError {
    /// Stable machine-readable name, used on the wire.
    pub const fn kind(self) -> &'static str {
        use GameError::*;
        match self {
            NoPuzzleAvailable => "no_puzzle_available",
            GameAlreadyOver => "game_already_over",
            EmptyInput => "empty_input",
            NotChinese => "not_chinese",
            AlreadyGuessed => "already_guessed",
            NoHiddenCharacters => "no_hidden_characters",
            HintLimitReached => "hint_limit_reached",
            SnapshotMismatch => "snapshot_mismatch",
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failures while reading a puzzle bank.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Malformed puzzle bank: {0}")]
    Json(#[from] serde_json::Error),
}
