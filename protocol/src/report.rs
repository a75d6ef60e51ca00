use poetle_core::{Count, Round, TimestampMs, format_mm_ss};
use serde::{Deserialize, Serialize};

/// Entries kept in a [`HighScoreTable`].
pub const HIGH_SCORE_LIMIT: usize = 10;

/// Summary of a finished (or abandoned) round, suitable for uploading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub poem_title: String,
    pub author: String,
    pub dynasty: String,
    pub score: u32,
    pub duration_seconds: u64,
    pub guess_count: Count,
    pub correct_guesses: Count,
    pub wrong_guesses: Count,
    pub hint_count: Count,
    pub max_combo: Count,
    /// Percentage of guesses that hit, 100 before any guess.
    pub accuracy: u32,
}

impl SessionReport {
    pub fn from_round(round: &Round, now: TimestampMs) -> Self {
        let puzzle = round.puzzle();
        let accuracy = if round.guess_count() > 0 {
            (round.correct_guesses() as f64 / round.guess_count() as f64 * 100.0).round() as u32
        } else {
            100
        };

        Self {
            poem_title: puzzle.title.clone(),
            author: puzzle.author.clone(),
            dynasty: puzzle.dynasty.clone(),
            score: round.score(now).total,
            duration_seconds: round.elapsed_secs(now),
            guess_count: round.guess_count(),
            correct_guesses: round.correct_guesses(),
            wrong_guesses: round.wrong_guesses(),
            hint_count: round.hint_count(),
            max_combo: round.max_consecutive_hits(),
            accuracy,
        }
    }

    /// `mm:ss` of the round duration.
    pub fn time(&self) -> String {
        format_mm_ss(self.duration_seconds)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub title: String,
    pub score: u32,
    pub guess_count: Count,
    pub time: String,
    /// RFC 3339 timestamp of when the round ended.
    pub date: String,
}

impl HighScoreEntry {
    pub fn from_report(report: &SessionReport, date: impl Into<String>) -> Self {
        Self {
            title: report.poem_title.clone(),
            score: report.score,
            guess_count: report.guess_count,
            time: report.time(),
            date: date.into(),
        }
    }
}

/// Best rounds so far, highest score first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Inserts `entry` and drops whatever falls off the bottom. Ties keep the
    /// older entry first.
    pub fn record(&mut self, entry: HighScoreEntry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_LIMIT);
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut table: Self = serde_json::from_str(json)?;
        table.entries.sort_by(|a, b| b.score.cmp(&a.score));
        table.entries.truncate(HIGH_SCORE_LIMIT);
        Ok(table)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
