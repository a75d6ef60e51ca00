use serde::{Deserialize, Serialize};

use crate::is_hanzi;

/// How a hidden cell became visible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealType {
    /// The player guessed the character.
    User,
    /// A hint uncovered the character.
    Hint,
    /// Completing the title uncovered the rest of the poem.
    Auto,
}

/// Reveal state of one character position of the puzzle content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealCell {
    #[serde(rename = "char")]
    pub ch: char,
    pub hidden: bool,
    pub reveal_type: Option<RevealType>,
}

impl RevealCell {
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            hidden: is_hanzi(ch),
            reveal_type: None,
        }
    }

    /// Whether the cell holds a guessable ideograph, revealed or not.
    pub const fn is_playable(&self) -> bool {
        is_hanzi(self.ch)
    }

    /// Hidden playable cells have no reveal type, visible ones have one, and
    /// punctuation is never hidden nor tagged.
    pub(crate) fn is_consistent(&self) -> bool {
        if self.is_playable() {
            self.hidden == self.reveal_type.is_none()
        } else {
            !self.hidden && self.reveal_type.is_none()
        }
    }

    /// Unhides the cell if it is still hidden, returns whether it changed.
    pub(crate) fn reveal(&mut self, how: RevealType) -> bool {
        if !self.hidden {
            return false;
        }
        self.hidden = false;
        self.reveal_type = Some(how);
        true
    }
}
