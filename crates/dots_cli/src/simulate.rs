//! Computer-only games for comparing opponents.

use anyhow::{Result, bail};
use dots_engine::{GameConfig, GameController, Outcome, PlayerId, PlayerKind, SessionEnd};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument};

/// Results for one seat across all simulated games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatTally {
    /// Player name from the config. Names need not be unique.
    pub name: String,
    /// Control mode.
    pub kind: PlayerKind,
    /// Games won outright.
    pub wins: usize,
    /// Cells captured over all games.
    pub cells: usize,
}

/// Aggregate results of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// Games played.
    pub games: usize,
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Per-player results in config order.
    pub players: Vec<SeatTally>,
    /// Games with a shared top score.
    pub ties: usize,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} games on {}x{}", self.games, self.width, self.height)?;
        for seat in &self.players {
            let average = if self.games == 0 {
                0.0
            } else {
                seat.cells as f64 / self.games as f64
            };
            writeln!(
                f,
                "  {} ({}): {} wins, {average:.1} cells per game",
                seat.name, seat.kind, seat.wins
            )?;
        }
        write!(f, "  ties: {}", self.ties)
    }
}

/// Plays `games` computer-only games and tallies the results by config seat.
///
/// With a seed, game `n` uses `seed + n`, so a run is reproducible as a whole.
/// The move delay is ignored.
#[instrument(skip(config), fields(width = config.width(), height = config.height()))]
pub async fn run_simulation(config: &GameConfig, games: usize) -> Result<SimulationReport> {
    if let Some(human) = config.players().iter().find(|p| !p.is_computer()) {
        bail!(
            "{} is a human player; pass --players with computer kinds, e.g. easy,hard",
            human.name()
        );
    }

    let mut report = SimulationReport {
        games,
        width: *config.width(),
        height: *config.height(),
        players: config
            .players()
            .iter()
            .map(|p| SeatTally {
                name: p.name().clone(),
                kind: *p.kind(),
                wins: 0,
                cells: 0,
            })
            .collect(),
        ties: 0,
    };

    for game in 0..games {
        let mut game_config = config.clone();
        game_config.set_ai_delay_ms(0);
        if let Some(seed) = config.seed() {
            game_config.set_seed(seed.wrapping_add(game as u64));
        }

        let mut controller = GameController::from_config(&game_config)?;
        let SessionEnd::Finished(summary) = controller.run().await? else {
            bail!("Game {game} stopped before the board was full");
        };
        let registry = controller.registry();
        let row = |player: PlayerId| registry.original_seat(player);

        for standing in &summary.standings {
            if let Some(row) = row(standing.player) {
                report.players[row].cells += standing.score;
            }
        }
        match &summary.outcome {
            Outcome::Winner(player) => {
                if let Some(row) = row(*player) {
                    report.players[row].wins += 1;
                }
            }
            Outcome::Tie(_) => report.ties += 1,
        }

        debug!(game, winner = %summary.winner, tie = summary.is_tie(), "Simulated game");
    }

    info!(games, ties = report.ties, "Simulation finished");
    Ok(report)
}
