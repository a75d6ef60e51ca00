use serde::Deserialize;

use super::*;

/// Loosely typed bank entry as exported by content tools; every field may be
/// missing.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct BankRow {
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    dynasty: Option<String>,
}

impl BankRow {
    fn into_puzzle(self) -> Puzzle {
        Puzzle::new(
            self.title.unwrap_or_default(),
            self.content.unwrap_or_default(),
            self.author.unwrap_or_default(),
            self.dynasty.unwrap_or_default(),
        )
        .normalized()
    }
}

/// In-memory list of playable puzzles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PuzzleBank {
    puzzles: Vec<Puzzle>,
}

impl PuzzleBank {
    /// Keeps only puzzles that have something to guess.
    pub fn new(puzzles: impl IntoIterator<Item = Puzzle>) -> Self {
        let puzzles = puzzles
            .into_iter()
            .map(Puzzle::normalized)
            .filter(|puzzle| {
                let playable = puzzle.is_playable();
                if !playable {
                    log::warn!("Skipping puzzle {:?}, it has no Chinese characters", puzzle.title);
                }
                playable
            })
            .collect();
        Self { puzzles }
    }

    /// Parses a JSON array of `{title, content, author, dynasty}` objects.
    pub fn from_json(json: &str) -> core::result::Result<Self, BankError> {
        let rows: Vec<BankRow> = serde_json::from_str(json)?;
        let total = rows.len();
        let bank = Self::new(rows.into_iter().map(BankRow::into_puzzle));
        log::debug!("Loaded {} of {} bank entries", bank.len(), total);
        Ok(bank)
    }

    /// A few well known Tang poems, used when no bank is supplied.
    pub fn sample() -> Self {
        Self::new([
            Puzzle::new(
                "静夜思",
                "静夜思\n床前明月光，疑是地上霜。举头望明月，低头思故乡。",
                "李白",
                "唐代",
            ),
            Puzzle::new(
                "春晓",
                "春晓\n春眠不觉晓，处处闻啼鸟。夜来风雨声，花落知多少。",
                "孟浩然",
                "唐代",
            ),
            Puzzle::new(
                "登鹳雀楼",
                "登鹳雀楼\n白日依山尽，黄河入海流。欲穷千里目，更上一层楼。",
                "王之涣",
                "唐代",
            ),
            Puzzle::new(
                "相思",
                "相思\n红豆生南国，春来发几枝。愿君多采撷，此物最相思。",
                "王维",
                "唐代",
            ),
            Puzzle::new(
                "江雪",
                "江雪\n千山鸟飞绝，万径人踪灭。孤舟蓑笠翁，独钓寒江雪。",
                "柳宗元",
                "唐代",
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn find(&self, title: &str) -> Option<&Puzzle> {
        self.puzzles.iter().find(|puzzle| puzzle.title == title)
    }
}

impl PuzzleSource for PuzzleBank {
    fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }
}
