use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// No guess accepted yet, the clock is not running.
    Ready,
    Active,
    Won,
}

impl RoundState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One attempt at a single puzzle, from the first hidden cell to the win.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    puzzle: Puzzle,
    rules: RulesConfig,
    cells: Vec<RevealCell>,
    title_len: usize,
    playable_cells: usize,
    guessed: Vec<char>,
    guess_count: Count,
    correct_guesses: Count,
    wrong_guesses: Count,
    consecutive_hits: Count,
    max_consecutive_hits: Count,
    hint_count: Count,
    start_time_ms: TimestampMs,
    end_time_ms: TimestampMs,
    won: bool,
    title_notified: bool,
}

impl Round {
    pub fn new(puzzle: Puzzle, rules: RulesConfig) -> Self {
        let cells: Vec<_> = puzzle.content.chars().map(RevealCell::new).collect();
        let title_len = cells
            .iter()
            .position(|cell| cell.ch == '\n')
            .unwrap_or(cells.len());
        let playable_cells = cells.iter().filter(|cell| cell.is_playable()).count();
        log::debug!(
            "New round for {:?}: {} cells, {} to guess",
            puzzle.title,
            cells.len(),
            playable_cells
        );

        Self {
            puzzle,
            rules,
            cells,
            title_len,
            playable_cells,
            guessed: Vec::new(),
            guess_count: 0,
            correct_guesses: 0,
            wrong_guesses: 0,
            consecutive_hits: 0,
            max_consecutive_hits: 0,
            hint_count: 0,
            start_time_ms: 0,
            end_time_ms: 0,
            won: false,
            title_notified: false,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn cells(&self) -> &[RevealCell] {
        &self.cells
    }

    pub fn cell_at(&self, index: CellIndex) -> Option<&RevealCell> {
        self.cells.get(index)
    }

    /// Distinct accepted guesses, in the order they were made.
    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    pub fn guess_count(&self) -> Count {
        self.guess_count
    }

    pub fn correct_guesses(&self) -> Count {
        self.correct_guesses
    }

    pub fn wrong_guesses(&self) -> Count {
        self.wrong_guesses
    }

    pub fn consecutive_hits(&self) -> Count {
        self.consecutive_hits
    }

    pub fn max_consecutive_hits(&self) -> Count {
        self.max_consecutive_hits
    }

    pub fn hint_count(&self) -> Count {
        self.hint_count
    }

    pub fn start_time_ms(&self) -> TimestampMs {
        self.start_time_ms
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn title_notified(&self) -> bool {
        self.title_notified
    }

    pub fn playable_cells(&self) -> usize {
        self.playable_cells
    }

    pub fn hidden_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.hidden).count()
    }

    pub fn state(&self) -> RoundState {
        if self.won {
            RoundState::Won
        } else if self.start_time_ms == 0 {
            RoundState::Ready
        } else {
            RoundState::Active
        }
    }

    /// Every cell of the first line is visible.
    pub fn title_complete(&self) -> bool {
        self.cells[..self.title_len].iter().all(|cell| !cell.hidden)
    }

    pub fn game_complete(&self) -> bool {
        self.cells.iter().all(|cell| !cell.hidden)
    }

    /// Whole seconds since the first accepted guess, frozen once won.
    pub fn elapsed_secs(&self, now: TimestampMs) -> u64 {
        if self.start_time_ms == 0 {
            return 0;
        }
        let end = if self.end_time_ms > 0 {
            self.end_time_ms
        } else {
            now
        };
        end.saturating_sub(self.start_time_ms) / 1000
    }

    /// Checks `input` without touching the round, yielding the guessed character.
    pub fn validate_guess(&self, input: &str) -> Result<char> {
        if self.won {
            return Err(GameError::GameAlreadyOver);
        }

        let input = input.trim();
        if input.is_empty() {
            return Err(GameError::EmptyInput);
        }

        let mut chars = input.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) if is_hanzi(ch) => ch,
            _ => return Err(GameError::NotChinese),
        };

        if self.guessed.contains(&ch) {
            return Err(GameError::AlreadyGuessed);
        }
        Ok(ch)
    }

    pub fn guess(&mut self, input: &str, now: TimestampMs) -> Result<GuessOutcome> {
        let ch = self.validate_guess(input)?;

        self.mark_started(now);
        self.guess_count += 1;
        self.guessed.push(ch);

        let found_positions = self.reveal_matching(ch, RevealType::User);
        let found_count = found_positions.len();

        if found_count > 0 {
            self.correct_guesses += 1;
            self.consecutive_hits += 1;
            self.max_consecutive_hits = self.max_consecutive_hits.max(self.consecutive_hits);
        } else {
            self.wrong_guesses += 1;
            self.consecutive_hits = 0;
        }

        let title_complete = self.settle(now);
        let score = self.score(now);

        let message = if found_count > 0 {
            let mut message = format!("Found {ch}!");
            if found_count > 1 {
                message.push_str(&format!(" {found_count} characters!"));
            }
            if self.consecutive_hits >= 2 {
                message.push_str(&format!(" {}-hit combo!", self.consecutive_hits));
            }
            message
        } else {
            format!("No \"{ch}\" in this poem")
        };

        Ok(GuessOutcome {
            character: ch,
            success: found_count > 0,
            message,
            found_positions,
            found_count,
            consecutive_hits: self.consecutive_hits,
            title_complete,
            game_complete: self.won,
            score,
        })
    }

    /// Uncovers every occurrence of one randomly chosen hidden character.
    pub fn reveal_hint(&mut self, rng: &mut SmallRng, now: TimestampMs) -> Result<HintOutcome> {
        if self.won {
            return Err(GameError::GameAlreadyOver);
        }

        let hidden: Vec<CellIndex> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.hidden)
            .map(|(index, _)| index)
            .collect();
        if hidden.is_empty() {
            return Err(GameError::NoHiddenCharacters);
        }

        if let Some(max_hints) = self.rules.max_hints {
            if self.hint_count >= max_hints {
                return Err(GameError::HintLimitReached);
            }
        }

        let ch = self.cells[hidden[rng.random_range(0..hidden.len())]].ch;
        let revealed_positions = self.reveal_matching(ch, RevealType::Hint);

        self.hint_count += 1;
        self.consecutive_hits = 0;
        self.settle(now);

        Ok(HintOutcome {
            character: ch,
            message: format!("Hint: revealed \"{ch}\" (-{HINT_PENALTY} points)"),
            revealed_positions,
            hint_count: self.hint_count,
            game_complete: self.won,
            score: self.score(now),
        })
    }

    pub fn score(&self, now: TimestampMs) -> ScoreReport {
        compute_score(&self.score_input(now))
    }

    pub fn score_input(&self, now: TimestampMs) -> ScoreInput<'_> {
        ScoreInput {
            guessed: &self.guessed,
            guess_count: self.guess_count,
            correct_guesses: self.correct_guesses,
            wrong_guesses: self.wrong_guesses,
            consecutive_hits: self.consecutive_hits,
            max_consecutive_hits: self.max_consecutive_hits,
            hint_count: self.hint_count,
            playable_cells: self.playable_cells,
            started: self.start_time_ms != 0,
            won: self.won,
            title_revealed: self.title_complete(),
            elapsed_secs: self.elapsed_secs(now),
        }
    }

    pub fn snapshot(&self, now: TimestampMs) -> RoundSnapshot {
        RoundSnapshot {
            puzzle_title: self.puzzle.title.clone(),
            cells: self.cells.clone(),
            guessed: self.guessed.clone(),
            guess_count: self.guess_count,
            correct_guesses: self.correct_guesses,
            wrong_guesses: self.wrong_guesses,
            consecutive_hits: self.consecutive_hits,
            max_consecutive_hits: self.max_consecutive_hits,
            hint_count: self.hint_count,
            start_time_ms: self.start_time_ms,
            end_time_ms: self.end_time_ms,
            score: self.score(now).total,
            won: self.won,
            title_notified: self.title_notified,
        }
    }

    /// Applies a saved snapshot. Snapshots of another puzzle, whose cells do
    /// not line up with this puzzle's content or whose win flags disagree with
    /// the cells, are refused and change nothing.
    pub fn restore(&mut self, snapshot: &RoundSnapshot) -> Result<()> {
        if snapshot.puzzle_title != self.puzzle.title {
            log::warn!(
                "Ignoring snapshot for {:?}, active puzzle is {:?}",
                snapshot.puzzle_title,
                self.puzzle.title
            );
            return Err(GameError::SnapshotMismatch);
        }

        let layout_matches = snapshot.cells.len() == self.cells.len()
            && snapshot
                .cells
                .iter()
                .zip(&self.cells)
                .all(|(saved, cell)| saved.ch == cell.ch && saved.is_consistent());
        if !layout_matches {
            log::warn!("Ignoring snapshot for {:?}, cell layout differs", snapshot.puzzle_title);
            return Err(GameError::SnapshotMismatch);
        }

        // A finished title always cascades into a win, and a win leaves
        // nothing hidden.
        let all_revealed = snapshot.cells.iter().all(|cell| !cell.hidden);
        let title_revealed = snapshot.cells[..self.title_len].iter().all(|cell| !cell.hidden);
        let state_matches = snapshot.won == all_revealed
            && snapshot.title_notified == snapshot.won
            && (!title_revealed || snapshot.won);
        if !state_matches {
            log::warn!(
                "Ignoring snapshot for {:?}, won={} does not match its cells",
                snapshot.puzzle_title,
                snapshot.won
            );
            return Err(GameError::SnapshotMismatch);
        }

        self.cells = snapshot.cells.clone();
        self.guessed = snapshot.guessed.clone();
        self.guess_count = snapshot.guess_count;
        self.correct_guesses = snapshot.correct_guesses;
        self.wrong_guesses = snapshot.wrong_guesses;
        self.consecutive_hits = snapshot.consecutive_hits;
        self.max_consecutive_hits = snapshot.max_consecutive_hits;
        self.hint_count = snapshot.hint_count;
        self.start_time_ms = snapshot.start_time_ms;
        self.end_time_ms = snapshot.end_time_ms;
        self.won = snapshot.won;
        self.title_notified = snapshot.title_notified;
        log::debug!(
            "Restored round for {:?} with {} guesses",
            self.puzzle.title,
            self.guess_count
        );
        Ok(())
    }

    fn reveal_matching(&mut self, ch: char, how: RevealType) -> Vec<CellIndex> {
        let mut positions = Vec::new();
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if cell.ch == ch && cell.reveal(how) {
                log::trace!("Revealed {:?} at {} ({:?})", ch, index, how);
                positions.push(index);
            }
        }
        positions
    }

    /// Runs the title cascade and win detection, returns whether the title
    /// was complete before the cascade ran.
    fn settle(&mut self, now: TimestampMs) -> bool {
        let title_complete = self.title_complete();

        if title_complete && !self.title_notified {
            let cascaded = self.reveal_remaining();
            log::debug!("Title complete, auto revealed {} cells", cascaded);
            self.title_notified = true;
            self.mark_won(now);
        }

        if self.game_complete() {
            self.mark_won(now);
        }

        title_complete
    }

    fn reveal_remaining(&mut self) -> usize {
        self.cells
            .iter_mut()
            .map(|cell| cell.reveal(RevealType::Auto))
            .filter(|&changed| changed)
            .count()
    }

    fn mark_started(&mut self, now: TimestampMs) {
        if self.start_time_ms == 0 {
            // zero is reserved for "not started"
            self.start_time_ms = now.max(1);
            log::debug!("Round clock started at {}", self.start_time_ms);
        }
    }

    fn mark_won(&mut self, now: TimestampMs) {
        if self.won {
            return;
        }
        self.won = true;
        if self.start_time_ms != 0 {
            self.end_time_ms = now.max(self.start_time_ms);
        }
        log::debug!(
            "Round for {:?} won after {} guesses",
            self.puzzle.title,
            self.guess_count
        );
    }
}
