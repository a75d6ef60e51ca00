use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use poetle_core::*;
use poetle_protocol::*;

/// Files a session reads and writes, all optional.
#[derive(Clone, Debug, Default)]
pub struct SessionFiles {
    pub snapshot: Option<PathBuf>,
    pub scores: Option<PathBuf>,
}

/// One player's game plus the high-score table, driven command by command.
pub struct Session<C = SystemClock> {
    engine: GameEngine<C>,
    bank: PuzzleBank,
    scores: HighScoreTable,
    files: SessionFiles,
}

impl<C: Clock> Session<C> {
    pub fn new(engine: GameEngine<C>, bank: PuzzleBank, files: SessionFiles) -> anyhow::Result<Self> {
        let scores = match &files.scores {
            Some(path) if path.exists() => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading scores {}", path.display()))?;
                HighScoreTable::from_json(&json)
                    .with_context(|| format!("parsing scores {}", path.display()))?
            }
            _ => HighScoreTable::default(),
        };

        Ok(Self {
            engine,
            bank,
            scores,
            files,
        })
    }

    pub fn engine(&self) -> &GameEngine<C> {
        &self.engine
    }

    pub fn scores(&self) -> &HighScoreTable {
        &self.scores
    }

    /// Picks up a saved round from the snapshot file, if there is one.
    pub fn resume(&mut self) -> anyhow::Result<Option<Event>> {
        let Some(path) = self.files.snapshot.as_ref().filter(|path| path.exists()) else {
            return Ok(None);
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let snapshot = RoundSnapshot::from_json(&json)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        log::info!("Resuming \"{}\" from {}", snapshot.puzzle_title, path.display());
        self.handle(Command::Restore { snapshot }).map(|mut events| events.pop())
    }

    /// Applies one command. Game rejections become [`Event::Rejected`], only
    /// file failures are errors.
    pub fn handle(&mut self, command: Command) -> anyhow::Result<Vec<Event>> {
        log::debug!("Command: {:?}", command);
        let events = match command {
            Command::NewRound { pick } => {
                let selection = match pick {
                    Pick::Random => Selection::Random,
                    Pick::Daily => Selection::Daily(Local::now().date_naive()),
                    Pick::Index(index) => Selection::Index(index),
                };
                match self.engine.init_round(&self.bank, selection) {
                    Ok(round) => vec![Event::RoundStarted {
                        board: BoardView::from_round(round),
                    }],
                    Err(err) => vec![err.into()],
                }
            }
            Command::Guess { input } => match self.engine.guess(&input) {
                Ok(outcome) => {
                    let finished = outcome.game_complete;
                    let mut events = vec![Event::Guessed {
                        outcome,
                        board: self.board()?,
                    }];
                    if finished {
                        events.push(self.finish_round()?);
                    }
                    events
                }
                Err(err) => vec![err.into()],
            },
            Command::Hint => match self.engine.use_hint() {
                Ok(outcome) => {
                    let finished = outcome.game_complete;
                    let mut events = vec![Event::Hinted {
                        outcome,
                        board: self.board()?,
                    }];
                    if finished {
                        events.push(self.finish_round()?);
                    }
                    events
                }
                Err(err) => vec![err.into()],
            },
            Command::Score => vec![Event::Score {
                report: self.engine.calculate_score(),
                elapsed: self.engine.formatted_time(),
            }],
            Command::Save => match self.engine.snapshot() {
                Some(snapshot) => {
                    if let Some(path) = &self.files.snapshot {
                        let json = snapshot.to_json()?;
                        fs::write(path, json)
                            .with_context(|| format!("writing snapshot {}", path.display()))?;
                        log::debug!("Saved round to {}", path.display());
                    }
                    vec![Event::Saved { snapshot }]
                }
                None => vec![Event::from(GameError::NoPuzzleAvailable)],
            },
            Command::Restore { snapshot } => vec![self.restore(&snapshot)],
            Command::HighScores => vec![Event::HighScores {
                entries: self.scores.entries().to_vec(),
            }],
        };
        Ok(events)
    }

    fn restore(&mut self, snapshot: &RoundSnapshot) -> Event {
        let Some(puzzle) = self.bank.find(&snapshot.puzzle_title).cloned() else {
            log::warn!("No puzzle titled \"{}\" in the bank", snapshot.puzzle_title);
            return GameError::SnapshotMismatch.into();
        };
        match self.engine.resume_round(puzzle, snapshot) {
            Ok(round) => Event::Restored {
                board: BoardView::from_round(round),
            },
            Err(err) => err.into(),
        }
    }

    fn board(&self) -> anyhow::Result<BoardView> {
        self.engine
            .round()
            .map(BoardView::from_round)
            .context("no active round")
    }

    /// Reports the won round and records it in the high-score table.
    fn finish_round(&mut self) -> anyhow::Result<Event> {
        let round = self
            .engine
            .round()
            .context("finished round disappeared")?;
        let report = SessionReport::from_round(round, self.engine.clock().now_ms());
        log::info!(
            "Solved \"{}\" for {} points in {}",
            report.poem_title,
            report.score,
            report.time()
        );

        self.scores
            .record(HighScoreEntry::from_report(&report, Local::now().to_rfc3339()));
        if let Some(path) = &self.files.scores {
            fs::write(path, self.scores.to_json()?)
                .with_context(|| format!("writing scores {}", path.display()))?;
        }

        Ok(Event::RoundOver { report })
    }
}
