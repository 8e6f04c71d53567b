//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::core::{GameConfig, PlayerId};

/// Citadels - draft a character, build a city, race to eight districts
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "citadels")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of players, 4 to 7 (default: CITADELS_PLAYERS or 4)
    #[arg(short, long)]
    pub players: Option<usize>,

    /// Random seed (default: CITADELS_SEED or 42)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Score the game after this many rounds, 0 for no limit
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Let the computer play every seat
    #[arg(long)]
    pub autoplay: bool,

    /// Tab-separated card list to use instead of the built-in one
    #[arg(long)]
    pub cards: Option<PathBuf>,

    /// Resume a saved game
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Start with computer hands shown
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Overlay the flags on a base configuration.
    #[must_use]
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(players) = self.players {
            config = config.with_players(players);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(rounds) = self.max_rounds {
            config = config.with_max_rounds(rounds);
        }
        let human = if self.autoplay { None } else { Some(PlayerId::new(0)) };
        config.with_human_seat(human)
    }
}

/// Log filter from `RUST_LOG`-style directives. Without any, only warnings
/// and errors are shown.
#[must_use]
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["citadels", "--players", "6", "--seed", "7", "--autoplay"]);
        let config = args.apply(GameConfig::default().with_max_rounds(30));
        assert_eq!(config.player_count, 6);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_rounds, 30);
        assert_eq!(config.human_seat, None);
    }

    #[test]
    fn test_defaults_keep_human_seat() {
        let args = Args::parse_from(["citadels"]);
        let config = args.apply(GameConfig::default());
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_log_filter_honours_directives() {
        use tracing::level_filters::LevelFilter;

        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("rust_citadels=trace")).max_level_hint(), Some(LevelFilter::TRACE));
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::WARN));
    }
}
