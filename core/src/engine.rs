use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// A single player's session: the active round plus the clock and random
/// source it is played against. Each session owns its own engine.
#[derive(Debug)]
pub struct GameEngine<C = SystemClock> {
    rules: RulesConfig,
    clock: C,
    rng: SmallRng,
    round: Option<Round>,
}

impl GameEngine<SystemClock> {
    pub fn new(rules: RulesConfig, seed: u64) -> Self {
        Self::with_clock(rules, SystemClock, seed)
    }
}

impl<C: Clock> GameEngine<C> {
    pub fn with_clock(rules: RulesConfig, clock: C, seed: u64) -> Self {
        Self {
            rules,
            clock,
            rng: SmallRng::seed_from_u64(seed),
            round: None,
        }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn state(&self) -> Option<RoundState> {
        self.round.as_ref().map(Round::state)
    }

    /// Drops the current round and starts a new one on a puzzle picked from
    /// `source`. With nothing to pick from, no round is left active.
    pub fn init_round<S>(&mut self, source: &S, selection: Selection) -> Result<&Round>
    where
        S: PuzzleSource + ?Sized,
    {
        self.round = None;

        let puzzles = source.puzzles();
        let rng = &mut self.rng;
        let Some(index) = selection.resolve(puzzles.len(), |len| rng.random_range(0..len)) else {
            log::warn!("Puzzle source is empty, no round started");
            return Err(GameError::NoPuzzleAvailable);
        };
        log::debug!("Selected puzzle {} of {} ({:?})", index, puzzles.len(), selection);

        Ok(self.start_round(puzzles[index].clone()))
    }

    /// Starts a new round on the given puzzle.
    pub fn start_round(&mut self, puzzle: Puzzle) -> &Round {
        self.round.insert(Round::new(puzzle, self.rules))
    }

    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome> {
        let now = self.clock.now_ms();
        self.active_round_mut()?.guess(input, now)
    }

    pub fn use_hint(&mut self) -> Result<HintOutcome> {
        let now = self.clock.now_ms();
        let round = self.round.as_mut().ok_or(GameError::NoPuzzleAvailable)?;
        round.reveal_hint(&mut self.rng, now)
    }

    /// Score of the active round, or the baseline when there is none.
    pub fn calculate_score(&self) -> ScoreReport {
        self.round
            .as_ref()
            .map(|round| round.score(self.clock.now_ms()))
            .unwrap_or_else(ScoreReport::baseline)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.round
            .as_ref()
            .map(|round| round.elapsed_secs(self.clock.now_ms()))
            .unwrap_or_default()
    }

    pub fn formatted_time(&self) -> String {
        format_mm_ss(self.elapsed_secs())
    }

    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        self.round
            .as_ref()
            .map(|round| round.snapshot(self.clock.now_ms()))
    }

    /// Restores saved progress into the active round, provided it belongs to
    /// the same puzzle.
    pub fn restore(&mut self, snapshot: &RoundSnapshot) -> Result<()> {
        self.active_round_mut()?.restore(snapshot)
    }

    /// Starts a round on `puzzle` with saved progress applied. A snapshot
    /// that does not fit leaves the current round untouched.
    pub fn resume_round(&mut self, puzzle: Puzzle, snapshot: &RoundSnapshot) -> Result<&Round> {
        let mut round = Round::new(puzzle, self.rules);
        round.restore(snapshot)?;
        Ok(self.round.insert(round))
    }

    fn active_round_mut(&mut self) -> Result<&mut Round> {
        self.round.as_mut().ok_or(GameError::NoPuzzleAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> (GameEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000);
        (
            GameEngine::with_clock(RulesConfig::default(), clock.clone(), 42),
            clock,
        )
    }

    #[test]
    fn empty_source_leaves_no_round() {
        let (mut engine, _) = engine();
        engine.start_round(Puzzle::new("春", "春\n眠", "", ""));

        let empty: Vec<Puzzle> = Vec::new();
        assert_eq!(
            engine.init_round(&empty, Selection::Random).unwrap_err(),
            GameError::NoPuzzleAvailable
        );
        assert!(engine.round().is_none());
        assert_eq!(engine.guess("春").unwrap_err(), GameError::NoPuzzleAvailable);
        assert_eq!(engine.use_hint().unwrap_err(), GameError::NoPuzzleAvailable);
        assert_eq!(engine.calculate_score(), ScoreReport::baseline());
    }

    #[test]
    fn index_selection_picks_from_bank() {
        let (mut engine, _) = engine();
        let bank = PuzzleBank::sample();

        let round = engine.init_round(&bank, Selection::Index(1)).unwrap();

        assert_eq!(round.puzzle().title, "春晓");
        assert_eq!(round.state(), RoundState::Ready);
    }

    #[test]
    fn random_selection_is_reproducible_per_seed() {
        let bank = PuzzleBank::sample();
        let (mut first, _) = engine();
        let (mut second, _) = engine();

        let a = first.init_round(&bank, Selection::Random).unwrap().puzzle().title.clone();
        let b = second.init_round(&bank, Selection::Random).unwrap().puzzle().title.clone();

        assert_eq!(a, b);
    }

    #[test]
    fn clock_starts_on_first_accepted_guess() {
        let (mut engine, clock) = engine();
        engine.start_round(Puzzle::new("江雪", "江雪\n千山鸟飞绝", "", ""));

        clock.advance_secs(100);
        assert_eq!(engine.elapsed_secs(), 0);
        assert_eq!(engine.guess("x").unwrap_err(), GameError::NotChinese);
        assert_eq!(engine.elapsed_secs(), 0);

        engine.guess("山").unwrap();
        clock.advance_secs(75);
        assert_eq!(engine.elapsed_secs(), 75);
        assert_eq!(engine.formatted_time(), "01:15");
    }

    #[test]
    fn speed_bonus_uses_time_to_win() {
        let (mut engine, clock) = engine();
        engine.start_round(Puzzle::new("江雪", "江雪\n千山鸟飞绝", "", ""));

        engine.guess("江").unwrap();
        clock.advance_secs(45);
        let outcome = engine.guess("雪").unwrap();

        assert!(outcome.game_complete);
        assert_eq!(outcome.score.breakdown.speed, 150);
        clock.advance_secs(600);
        assert_eq!(engine.calculate_score(), engine.calculate_score());
        assert_eq!(engine.calculate_score().breakdown.speed, 150);
    }

    #[test]
    fn restore_requires_matching_puzzle() {
        let (mut engine, _) = engine();
        engine.start_round(Puzzle::new("江雪", "江雪\n千山鸟飞绝", "", ""));
        engine.guess("山").unwrap();
        let saved = engine.snapshot().unwrap();

        engine.start_round(Puzzle::new("春晓", "春晓\n春眠不觉晓", "", ""));
        assert_eq!(engine.restore(&saved), Err(GameError::SnapshotMismatch));
        assert_eq!(engine.round().unwrap().guess_count(), 0);

        engine.start_round(Puzzle::new("江雪", "江雪\n千山鸟飞绝", "", ""));
        engine.restore(&saved).unwrap();
        assert_eq!(engine.round().unwrap().guessed(), &['山']);
        assert_eq!(engine.guess("山").unwrap_err(), GameError::AlreadyGuessed);
    }

    #[test]
    fn failed_resume_keeps_current_round() {
        let (mut engine, _) = engine();
        engine.start_round(Puzzle::new("江雪", "江雪\n千山鸟飞绝", "", ""));
        engine.guess("山").unwrap();
        let saved = engine.snapshot().unwrap();

        engine.start_round(Puzzle::new("春晓", "春晓\n春眠不觉晓", "", ""));
        engine.guess("春").unwrap();
        let err = engine
            .resume_round(Puzzle::new("春晓", "春晓\n春眠不觉晓", "", ""), &saved)
            .unwrap_err();
        assert_eq!(err, GameError::SnapshotMismatch);
        assert_eq!(engine.round().unwrap().guessed(), &['春']);

        let round = engine
            .resume_round(Puzzle::new("江雪", "江雪\n千山鸟飞绝", "", ""), &saved)
            .unwrap();
        assert_eq!(round.guessed(), &['山']);
    }
}
