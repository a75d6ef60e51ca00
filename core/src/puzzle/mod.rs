use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::*;
pub use bank::*;

mod bank;

/// Title used for bank entries that come without one.
pub const UNTITLED: &str = "未命名作品";

/// A poem to be guessed. `content` starts with the title line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub dynasty: String,
}

impl Puzzle {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        dynasty: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            dynasty: dynasty.into(),
        }
    }

    /// Fills in a missing title and puts the title line in front of bodies
    /// that lack one.
    pub fn normalized(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = UNTITLED.into();
        }
        if !self.content.contains('\n') {
            self.content = format!("{}\n{}", self.title, self.content);
        }
        self
    }

    /// Whether the content has at least one guessable character.
    pub fn is_playable(&self) -> bool {
        self.content.chars().any(is_hanzi)
    }
}

/// Anything that can hand out puzzles for a new round.
pub trait PuzzleSource {
    fn puzzles(&self) -> &[Puzzle];
}

impl PuzzleSource for [Puzzle] {
    fn puzzles(&self) -> &[Puzzle] {
        self
    }
}

impl PuzzleSource for Vec<Puzzle> {
    fn puzzles(&self) -> &[Puzzle] {
        self
    }
}

/// Which puzzle of a source a new round uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Uniformly random, drawn from the engine's RNG.
    Random,
    /// The same puzzle for everyone on a given calendar day.
    Daily(NaiveDate),
    /// A fixed position, wrapping around the source length.
    Index(usize),
}

impl Selection {
    /// Resolves to an index given the source length and a random draw. Returns
    /// `None` for an empty source.
    pub(crate) fn resolve(self, len: usize, draw: impl FnOnce(usize) -> usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match self {
            Self::Random => draw(len),
            Self::Daily(date) => daily_seed(date) as usize % len,
            Self::Index(index) => index % len,
        })
    }
}

/// `yyyymmdd` as a number, e.g. `20261018`.
pub fn daily_seed(date: NaiveDate) -> u32 {
    date.year().unsigned_abs() * 10000 + date.month() * 100 + date.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_prefixes_title_line() {
        let puzzle = Puzzle::new("相思", "红豆生南国", "王维", "唐代").normalized();
        assert_eq!(puzzle.content, "相思\n红豆生南国");

        let untouched = Puzzle::new("春晓", "春晓\n春眠不觉晓", "", "").normalized();
        assert_eq!(untouched.content, "春晓\n春眠不觉晓");
    }

    #[test]
    fn normalized_names_untitled_entries() {
        let puzzle = Puzzle::new(" ", "白日依山尽", "", "").normalized();
        assert_eq!(puzzle.title, UNTITLED);
        assert!(puzzle.content.starts_with(UNTITLED));
    }

    #[test]
    fn daily_selection_is_stable_per_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(daily_seed(date), 20261018);
        let pick = Selection::Daily(date).resolve(7, |_| unreachable!());
        assert_eq!(pick, Some(20261018 % 7));
        assert_eq!(pick, Selection::Daily(date).resolve(7, |_| 0));
    }

    #[test]
    fn empty_source_resolves_to_nothing() {
        assert_eq!(Selection::Random.resolve(0, |_| 0), None);
        assert_eq!(Selection::Index(5).resolve(3, |_| 0), Some(2));
    }
}
