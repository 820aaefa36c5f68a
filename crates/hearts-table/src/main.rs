use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, event};

use hearts_engine::game::{Game, MatchConfig};
use hearts_engine::model::player::PlayerPosition;
use hearts_table::config::TableConfig;
use hearts_table::logging::init_logging;
use hearts_table::presenter::ConsolePresenter;
use hearts_table::seating::Seating;

/// Four-seat Hearts table for bots, language models and one human.
#[derive(Debug, Parser)]
#[command(name = "hearts", author, version, about = "Play Hearts at the terminal")]
struct Cli {
    /// Path to the YAML table configuration. Four cautious bots when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of consecutive games.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed; game N is dealt from seed + N.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the pause after every bot card, in milliseconds.
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Append one JSON line per finished round to this file.
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::default_table(),
    };

    if let Some(games) = cli.games {
        config.games = games;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(delay_ms) = cli.delay_ms {
        config.delay_ms = delay_ms;
    }

    config.validate()?;

    let names = config.names();
    let games = config.games;
    println!(
        "Seated {} for {games} game{}",
        names.join(", "),
        if games == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging)?;
    let seating = Seating::prepare(&config)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let mut history = match cli.history.as_ref() {
        Some(path) => Some(BufWriter::new(File::create(path).with_context(|| {
            format!("creating history file at {}", path.display())
        })?)),
        None => None,
    };

    let face_up = Seating::console_seat(&config).unwrap_or(PlayerPosition::North);
    let mut wins = [0usize; 4];

    for game_no in 0..games {
        let seed = match config.seed {
            Some(base) => base.wrapping_add(game_no as u64),
            None => rand::random(),
        };
        let match_config = MatchConfig::new(names.iter().cloned(), Some(seed))?;
        let presenter = ConsolePresenter::stdout(match_config.names().clone(), face_up);
        let strategies = seating.strategies(&config, seed)?;
        let mut game = Game::new(match_config, strategies, Box::new(presenter));

        event!(target: "hearts_table", Level::INFO, game = game_no + 1, seed, "dealing game");
        let outcome = game
            .play()
            .await
            .with_context(|| format!("game {} (seed {seed}) stopped", game_no + 1))?;

        if let Some(out) = history.as_mut() {
            for record in game.history() {
                writeln!(out, "{}", record.to_json_line()?)
                    .context("writing round history")?;
            }
        }

        wins[outcome.winner.index()] += 1;
        println!(
            "Game {} won by {} after {} rounds (seed {seed}), scores: {:?}",
            game_no + 1,
            outcome.winner_name,
            outcome.rounds,
            outcome.scores.standings()
        );
    }

    if let Some(mut out) = history {
        out.flush().context("flushing round history")?;
    }

    let tally: Vec<String> = names
        .iter()
        .zip(wins)
        .map(|(name, won)| format!("{name} {won}"))
        .collect();
    println!("Wins: {}", tally.join(", "));

    Ok(())
}
