use serde::{Deserialize, Serialize};

use crate::*;

/// Points every round starts with; also the lowest total a round can have.
pub const BASE_SCORE: Points = 500;
pub const PERFECT_CLEAR_BONUS: Points = 300;
pub const TITLE_BONUS: Points = 100;
pub const HINT_PENALTY: Points = 30;
pub const MISS_PENALTY: Points = 20;
/// Wrong guesses needed before [`MISS_PENALTY`] applies.
pub const MISS_PENALTY_THRESHOLD: Count = 3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: Points,
    pub characters: Points,
    pub combo: Points,
    pub speed: Points,
    pub accuracy: Points,
    pub strategy: Points,
    pub achievements: Points,
    pub penalties: Points,
}

impl ScoreBreakdown {
    /// Breakdown of a round whose clock has not started.
    pub const fn baseline() -> Self {
        Self {
            base: BASE_SCORE,
            characters: 0,
            combo: 0,
            speed: 0,
            accuracy: 0,
            strategy: 0,
            achievements: 0,
            penalties: 0,
        }
    }

    pub const fn sum(&self) -> Points {
        self.base
            + self.characters
            + self.combo
            + self.speed
            + self.accuracy
            + self.strategy
            + self.achievements
            + self.penalties
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
    /// Combo increment of the current streak's latest hit, plus the perfect
    /// clear bonus on the guess that completes one. Informational only, it is
    /// not added to `total` and is recomputed on every call.
    pub last_bonus: Points,
}

impl ScoreReport {
    pub const fn baseline() -> Self {
        Self {
            total: BASE_SCORE as u32,
            breakdown: ScoreBreakdown::baseline(),
            last_bonus: 0,
        }
    }
}

/// Everything the scoring rules look at, detached from the round itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreInput<'a> {
    pub guessed: &'a [char],
    pub guess_count: Count,
    pub correct_guesses: Count,
    pub wrong_guesses: Count,
    pub consecutive_hits: Count,
    pub max_consecutive_hits: Count,
    pub hint_count: Count,
    pub playable_cells: usize,
    pub started: bool,
    pub won: bool,
    pub title_revealed: bool,
    pub elapsed_secs: u64,
}

impl ScoreInput<'_> {
    /// Won without a miss and with one correct guess per playable cell. A
    /// hint reveals cells nobody guessed, so a hinted round never qualifies.
    pub fn is_perfect_clear(&self) -> bool {
        self.won
            && self.wrong_guesses == 0
            && self.correct_guesses as usize == self.playable_cells
    }
}

/// Stepped combo value for a streak of `hits` correct guesses.
pub const fn combo_step(hits: Count) -> Points {
    match hits {
        0..=1 => 0,
        2 => 30,
        3 => 60,
        4 => 100,
        _ => 150,
    }
}

pub const fn speed_bonus(elapsed_secs: u64) -> Points {
    match elapsed_secs {
        0..=30 => 200,
        31..=60 => 150,
        61..=120 => 100,
        121..=180 => 50,
        _ => 0,
    }
}

/// Accuracy tiers compared in integer arithmetic, `correct / total >= 0.9` etc.
pub const fn accuracy_bonus(correct: Count, total: Count) -> Points {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (correct as u64 * 10, total as u64);
    if correct >= total * 9 {
        150
    } else if correct >= total * 8 {
        100
    } else if correct >= total * 7 {
        50
    } else {
        0
    }
}

pub const fn strategy_bonus(hint_count: Count) -> Points {
    match hint_count {
        0 => 200,
        1 => 100,
        _ => 0,
    }
}

/// Recomputes the whole score from `input`; there is no running ledger.
pub fn compute_score(input: &ScoreInput) -> ScoreReport {
    if !input.started {
        return ScoreReport::baseline();
    }

    let mut breakdown = ScoreBreakdown::baseline();

    breakdown.characters = input
        .guessed
        .iter()
        .map(|&ch| CharClass::of(ch).points())
        .sum();

    let perfect = input.is_perfect_clear();
    breakdown.combo = combo_step(input.max_consecutive_hits);
    if perfect {
        breakdown.combo += PERFECT_CLEAR_BONUS;
    }

    if input.won {
        breakdown.speed = speed_bonus(input.elapsed_secs);
        breakdown.strategy = strategy_bonus(input.hint_count);
        if input.title_revealed {
            breakdown.achievements += TITLE_BONUS;
        }
    }

    breakdown.accuracy = accuracy_bonus(input.correct_guesses, input.guess_count);

    breakdown.penalties = -(input.hint_count as Points) * HINT_PENALTY;
    if input.wrong_guesses >= MISS_PENALTY_THRESHOLD {
        breakdown.penalties -= MISS_PENALTY;
    }

    let mut last_bonus = 0;
    if input.consecutive_hits > 0 {
        last_bonus += combo_step(input.consecutive_hits) - combo_step(input.consecutive_hits - 1);
    }
    if perfect && input.consecutive_hits as usize == input.playable_cells {
        last_bonus += PERFECT_CLEAR_BONUS;
    }

    ScoreReport {
        total: breakdown.sum().max(BASE_SCORE) as u32,
        breakdown,
        last_bonus,
    }
}
