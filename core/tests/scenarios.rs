use poetle_core::*;

fn engine_on(content: &str) -> (GameEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_000);
    let mut engine = GameEngine::with_clock(RulesConfig::default(), clock.clone(), 0);
    let title = content.split('\n').next().unwrap_or_default();
    engine.start_round(Puzzle::new(title, content, "", ""));
    (engine, clock)
}

#[test]
fn guessing_one_character_title_wins_immediately() {
    let (mut engine, _) = engine_on("春\n眠");

    let outcome = engine.guess("春").unwrap();

    assert!(outcome.success);
    assert!(outcome.title_complete);
    assert!(outcome.game_complete);
    let round = engine.round().unwrap();
    assert!(round.is_won());
    assert!(round.title_notified());
    assert_eq!(round.cell_at(0).unwrap().reveal_type, Some(RevealType::User));
    assert_eq!(round.cell_at(2).unwrap().reveal_type, Some(RevealType::Auto));
    assert_eq!(round.state(), RoundState::Won);
}

#[test]
fn absent_character_counts_as_wrong_guess() {
    let (mut engine, _) = engine_on("春晓\n春眠不觉晓，处处闻啼鸟。");

    let outcome = engine.guess("虎").unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.found_count, 0);
    assert!(outcome.found_positions.is_empty());
    let round = engine.round().unwrap();
    assert_eq!(round.wrong_guesses(), 1);
    assert_eq!(round.consecutive_hits(), 0);
    assert_eq!(round.guess_count(), 1);
}

#[test]
fn duplicate_guess_is_not_counted() {
    let (mut engine, _) = engine_on("春晓\n春眠不觉晓");

    engine.guess("虎").unwrap();
    assert_eq!(engine.guess("虎").unwrap_err(), GameError::AlreadyGuessed);
    assert_eq!(engine.round().unwrap().guess_count(), 1);
}

#[test]
fn perfect_clear_earns_bonus_on_the_final_guess() {
    // Title last so every character is revealed by hand.
    let (mut engine, clock) = engine_on("月落\n落月");

    let first = engine.guess("月").unwrap();
    assert_eq!(first.score.last_bonus, 0);
    clock.advance_secs(5);
    let last = engine.guess("落").unwrap();

    assert!(last.game_complete);
    // The title line shares its characters with the body, so two distinct
    // guesses cover four cells and no perfect clear is possible.
    assert_eq!(last.score.breakdown.combo, 30);
    assert_eq!(last.score.last_bonus, 30);

    let (mut engine, _) = engine_on("月\n落");
    let outcome = engine.guess("落").unwrap();
    assert!(!outcome.game_complete);
    let outcome = engine.guess("月").unwrap();
    assert!(outcome.game_complete);
    assert_eq!(outcome.score.breakdown.combo, 30 + PERFECT_CLEAR_BONUS);
    assert_eq!(outcome.score.last_bonus, 30 + PERFECT_CLEAR_BONUS);
}

#[test]
fn hinted_round_is_never_a_perfect_clear() {
    // Without the hint, guessing 落 then 月 is a perfect clear.
    let (mut engine, _) = engine_on("月\n落");
    engine.guess("落").unwrap();
    let outcome = engine.use_hint().unwrap();

    assert_eq!(outcome.character, '月');
    assert!(outcome.game_complete);
    let round = engine.round().unwrap();
    assert!(round.is_won());
    assert_eq!(round.wrong_guesses(), 0);
    assert_eq!(round.consecutive_hits(), 0);

    let score = engine.calculate_score();
    assert_eq!(score.breakdown.combo, 0);
    assert_eq!(score.last_bonus, 0);
    assert_eq!(score.breakdown.strategy, 100);
    assert_eq!(score.breakdown.penalties, -HINT_PENALTY);
}

#[test]
fn full_round_breakdown() {
    let (mut engine, clock) = engine_on("江雪\n千山鸟飞绝，万径人踪灭。");

    engine.guess("山").unwrap(); // 30
    engine.guess("鸟").unwrap(); // 30
    engine.guess("虎").unwrap(); // 30, miss
    clock.advance_secs(50);
    engine.guess("江").unwrap(); // 30
    let outcome = engine.guess("雪").unwrap(); // 30, title complete

    assert!(outcome.title_complete);
    assert!(outcome.game_complete);
    let breakdown = outcome.score.breakdown;
    assert_eq!(breakdown.base, 500);
    assert_eq!(breakdown.characters, 150);
    assert_eq!(breakdown.combo, 30);
    assert_eq!(breakdown.speed, 150);
    assert_eq!(breakdown.accuracy, 100);
    assert_eq!(breakdown.strategy, 200);
    assert_eq!(breakdown.achievements, 100);
    assert_eq!(breakdown.penalties, 0);
    assert_eq!(outcome.score.total, 1230);
}

#[test]
fn guesses_after_win_are_refused() {
    let (mut engine, _) = engine_on("春\n眠");
    engine.guess("春").unwrap();

    assert_eq!(engine.guess("眠").unwrap_err(), GameError::GameAlreadyOver);
    assert_eq!(engine.use_hint().unwrap_err(), GameError::GameAlreadyOver);
}

#[test]
fn snapshot_survives_json() {
    let (mut engine, _) = engine_on("江雪\n千山鸟飞绝");
    engine.guess("山").unwrap();
    engine.guess("虎").unwrap();

    let json = engine.snapshot().unwrap().to_json().unwrap();
    let (mut resumed, _) = engine_on("江雪\n千山鸟飞绝");
    resumed.restore(&RoundSnapshot::from_json(&json).unwrap()).unwrap();

    assert_eq!(resumed.round(), engine.round());
}
