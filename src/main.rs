//! Console entry point.

use anyhow::{Context, Result};
use clap::Parser;

use rust_citadels::cards::source::{default_catalog, load_tsv};
use rust_citadels::cli::{log_filter, Args, ConsolePolicy, ConsoleView};
use rust_citadels::core::GameConfig;
use rust_citadels::persist::Snapshot;
use rust_citadels::policy::computer_seats;
use rust_citadels::rules::GameEngine;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.apply(GameConfig::from_env());

    let catalog = match &args.cards {
        Some(path) => load_tsv(path).with_context(|| format!("loading card list {}", path.display()))?,
        None => default_catalog().context("loading the built-in card list")?,
    };

    let mut seats = computer_seats(&config);
    if let Some(seat) = config.human_seat {
        if let Some(slot) = seats.get_mut(seat.index()) {
            *slot = Box::new(ConsolePolicy::stdio());
        }
    }

    let mut engine = GameEngine::new(config.clone(), catalog, seats)?;
    engine.subscribe(Box::new(ConsoleView::new(std::io::stdout(), config.human_seat)));
    engine.state_mut().debug = args.debug;

    if let Some(path) = &args.load {
        let snapshot = Snapshot::load(path).with_context(|| format!("loading {}", path.display()))?;
        engine.restore(&snapshot)?;
    }

    let outcome = engine.run()?;
    tracing::info!(winner = ?outcome.winner, rounds = outcome.rounds, "finished");
    Ok(())
}
