//! Dots - terminal Dots and Boxes
//!
//! Interactive play against people or computer opponents, and bulk
//! computer-only simulation.

#![warn(missing_docs)]

mod cli;
mod play;
mod render;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, Overrides};
use dots_engine::{GameConfig, GameMode, PlayerKind, parse_player_kinds};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            opponent,
            multi,
            overrides,
            ai_delay_ms,
            log_file,
        } => {
            init_file_logging(&log_file)?;
            let mut config =
                load_config(config.as_deref(), opponent.as_deref(), multi, &overrides)?;
            if let Some(delay) = ai_delay_ms {
                config.set_ai_delay_ms(delay);
            }
            play::run_play(config).await
        }
        Command::Simulate {
            games,
            config,
            overrides,
            json,
        } => {
            init_stderr_logging();
            let config = load_config(config.as_deref(), None, false, &overrides)?;
            let report = simulate::run_simulation(&config, games).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
            Ok(())
        }
    }
}

/// Logs to a file so output does not interleave with the board.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds the session config: file or mode defaults, then flag overrides.
#[instrument(skip(overrides))]
fn load_config(
    path: Option<&Path>,
    opponent: Option<&str>,
    multi: bool,
    overrides: &Overrides,
) -> Result<GameConfig> {
    let mut rng = match overrides.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut config = match (path, opponent) {
        (Some(path), _) => GameConfig::from_file(path)?,
        (None, Some(kind)) => {
            GameConfig::for_mode(GameMode::Single(PlayerKind::parse(kind)?), &mut rng)?
        }
        (None, None) if multi => GameConfig::for_mode(GameMode::Multi, &mut rng)?,
        (None, None) => GameConfig::default(),
    };

    if overrides.width.is_some() || overrides.height.is_some() {
        let width = overrides.width.unwrap_or(*config.width());
        let height = overrides.height.unwrap_or(*config.height());
        config.set_size(width, height);
    }
    if let Some(players) = &overrides.players {
        config.set_player_kinds(&parse_player_kinds(players)?);
    }
    if let Some(seed) = overrides.seed {
        config.set_seed(seed);
    }
    if overrides.shuffle_seats {
        config.set_shuffle_seats(true);
    }

    config.validate()?;
    debug!(?config, "Resolved config");
    info!(
        width = config.width(),
        height = config.height(),
        players = config.players().len(),
        "Config ready"
    );
    Ok(config)
}
