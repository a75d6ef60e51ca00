use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use poetle_core::{GameEngine, PuzzleBank};
use poetle_protocol::{Command, Event, Pick};

use crate::config::FileConfig;
use crate::session::{Session, SessionFiles};

mod config;
mod session;

/// Plays the poem guessing game over JSON lines: one command per stdin line,
/// one event per stdout line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with rules and default paths
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON puzzle bank, the built-in sample if omitted
    #[arg(short, long)]
    bank: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start on today's puzzle instead of waiting for a new_round command
    #[arg(long)]
    daily: bool,

    /// File used by `save` and resumed from at startup
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// High-score table file
    #[arg(long)]
    scores: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let bank = match args.bank.as_ref().or(file_config.bank.as_ref()) {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading bank {}", path.display()))?;
            PuzzleBank::from_json(&json).with_context(|| format!("parsing bank {}", path.display()))?
        }
        None => PuzzleBank::sample(),
    };
    log::info!("Loaded {} puzzles", bank.len());

    let seed = args.seed.unwrap_or_else(rand_seed);
    log::debug!("seed: {}", seed);

    let files = SessionFiles {
        snapshot: args.snapshot.or(file_config.snapshot),
        scores: args.scores.or(file_config.scores),
    };
    let engine = GameEngine::new(file_config.rules, seed);
    let mut session = Session::new(engine, bank, files)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let resumed = session.resume()?;
    let opening = match resumed {
        Some(event) => vec![event],
        None if args.daily => session.handle(Command::NewRound { pick: Pick::Daily })?,
        None => Vec::new(),
    };
    emit(&mut out, &opening)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let events = match Command::from_json(&line) {
            Ok(command) => session.handle(command)?,
            Err(err) => {
                log::warn!("Unreadable command {:?}: {}", line, err);
                vec![Event::Rejected {
                    kind: "bad_command".into(),
                    message: err.to_string(),
                }]
            }
        };
        emit(&mut out, &events)?;
    }

    Ok(())
}

fn emit(out: &mut impl Write, events: &[Event]) -> anyhow::Result<()> {
    for event in events {
        writeln!(out, "{}", event.to_json()?)?;
    }
    out.flush()?;
    Ok(())
}

fn rand_seed() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or_default()
}
