//! Command-line interface for dots.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Dots and Boxes in the terminal
#[derive(Parser, Debug)]
#[command(name = "dots")]
#[command(about = "Dots and Boxes against friends or computer opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Path to a game config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// One human against a computer opponent of this kind
        #[arg(long, conflicts_with_all = ["config", "multi", "players"])]
        opponent: Option<String>,

        /// Every seat is human
        #[arg(long, conflicts_with_all = ["config", "players"])]
        multi: bool,

        /// Settings shared with `simulate`
        #[command(flatten)]
        overrides: Overrides,

        /// Pause before computer moves, in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,

        /// Log file for the session
        #[arg(long, default_value = "dots.log")]
        log_file: PathBuf,
    },

    /// Play computer-only games and tally the results
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Path to a game config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Settings shared with `play`
        #[command(flatten)]
        overrides: Overrides,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Config file overrides.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Board width in cells
    #[arg(long)]
    pub width: Option<usize>,

    /// Board height in cells
    #[arg(long)]
    pub height: Option<usize>,

    /// Comma-separated player kinds in seat order, e.g. `human,hard`
    #[arg(long)]
    pub players: Option<String>,

    /// Seed for seat shuffling and computer moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shuffle seats before the first turn
    #[arg(long)]
    pub shuffle_seats: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_defaults() {
        let cli = Cli::try_parse_from(["dots", "play"]).unwrap();
        let Command::Play {
            config,
            multi,
            log_file,
            ..
        } = cli.command
        else {
            panic!("expected play");
        };
        assert!(config.is_none());
        assert!(!multi);
        assert_eq!(log_file, PathBuf::from("dots.log"));
    }

    #[test]
    fn test_simulate_overrides() {
        let cli = Cli::try_parse_from([
            "dots",
            "simulate",
            "--games",
            "5",
            "--width",
            "3",
            "--players",
            "easy,hard",
            "--seed",
            "7",
        ])
        .unwrap();
        let Command::Simulate {
            games, overrides, ..
        } = cli.command
        else {
            panic!("expected simulate");
        };
        assert_eq!(games, 5);
        assert_eq!(overrides.width, Some(3));
        assert_eq!(overrides.players.as_deref(), Some("easy,hard"));
        assert_eq!(overrides.seed, Some(7));
    }

    #[test]
    fn test_opponent_conflicts_with_multi() {
        assert!(Cli::try_parse_from(["dots", "play", "--opponent", "hard", "--multi"]).is_err());
    }
}
