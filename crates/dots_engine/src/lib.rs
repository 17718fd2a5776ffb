//! Dots and Boxes game engine.
//!
//! Players take turns drawing edges on a grid of dots. Whoever draws the
//! last free side of a cell owns it and moves again; the game ends when
//! every cell is owned.
//!
//! # Architecture
//!
//! - **Board**: cell and edge arenas linked by id, plus the free-edge and
//!   open-cell bookkeeping
//! - **Rules**: scoring and winner determination as pure functions
//! - **AI**: Easy, Medium and Hard move selectors
//! - **Controller**: async turn loop fed by a human handoff or a computer
//!   opponent, reporting progress as [`GameEvent`]s
//!
//! # Example
//!
//! ```no_run
//! use dots_engine::{GameConfig, GameController, SessionEnd};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut config = GameConfig::default();
//! config.set_player_kinds(&[
//!     dots_engine::PlayerKind::Easy,
//!     dots_engine::PlayerKind::Hard,
//! ]);
//! let mut controller = GameController::from_config(&config)?;
//! if let SessionEnd::Finished(summary) = controller.run().await? {
//!     println!("{} wins", summary.winner);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod ai;
mod board;
mod cell;
mod config;
mod controller;
mod edge;
mod handoff;
pub mod invariants;
mod player;
mod registry;
pub mod rules;
mod source;

// Crate-level exports - Board model
pub use board::{Board, BoardError};
pub use cell::{Cell, CellId, Side};
pub use edge::{Edge, EdgeId, Orientation};

// Crate-level exports - Players and turns
pub use player::{Difficulty, ParsePlayerKindError, Player, PlayerId, PlayerKind};
pub use registry::{PlayerRegistry, RegistryError};

// Crate-level exports - Rules
pub use rules::{Outcome, Standing, outcome, score, standings, winner};

// Crate-level exports - AI
pub use ai::{MAX_SAFE_ATTEMPTS, capturing_edge, gifts_cell, select_ai_move};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, GameMode, parse_player_kinds};

// Crate-level exports - Turn control
pub use action::Move;
pub use controller::{
    ControllerError, GameController, GameEvent, GameSummary, SessionEnd, StopHandle, TurnResult,
};
pub use handoff::{MoveReceiver, MoveSubmitter, SubmitError, human_move_channel};
pub use source::{ComputerOpponent, HumanInput, MoveSource};
