//! Game configuration loaded from TOML.

use crate::player::{Player, PlayerKind};
use crate::registry::PlayerRegistry;
use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How the seats are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One human against one computer opponent of the given kind. Which seat
    /// the computer takes is random, so the starting side varies.
    Single(PlayerKind),
    /// Every seat is human.
    Multi,
}

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in cells.
    #[serde(default = "default_size")]
    width: usize,

    /// Board height in cells.
    #[serde(default = "default_size")]
    height: usize,

    /// Pause before a computer move is announced, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Seed for the session rng; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Shuffle seating order before the first turn.
    #[serde(default)]
    shuffle_seats: bool,

    /// Players in turn order.
    #[serde(default = "default_players")]
    players: Vec<Player>,
}

#[instrument]
fn default_size() -> usize {
    5
}

#[instrument]
fn default_ai_delay_ms() -> u64 {
    500
}

#[instrument]
fn default_players() -> Vec<Player> {
    vec![
        Player::new("Cheese", 'C', "yellow", PlayerKind::Human),
        Player::new("Mouse", 'M', "grey", PlayerKind::Hard),
    ]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            ai_delay_ms: default_ai_delay_ms(),
            seed: None,
            shuffle_seats: false,
            players: default_players(),
        }
    }
}

impl GameConfig {
    /// Builds the seats for a game mode from the default two players.
    ///
    /// In [`GameMode::Single`] the computer seat is chosen with `rng`.
    #[instrument(skip(rng))]
    pub fn for_mode<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> Result<Self, ConfigError> {
        let mut players = default_players();
        match mode {
            GameMode::Multi => {
                for player in &mut players {
                    *player = player.with_kind(PlayerKind::Human);
                }
            }
            GameMode::Single(kind) => {
                if !kind.is_computer() {
                    return Err(ConfigError::new(format!(
                        "single player mode needs a computer opponent, got {kind}"
                    )));
                }
                let computer = rng.gen_range(0..players.len());
                for (seat, player) in players.iter_mut().enumerate() {
                    let seat_kind = if seat == computer { kind } else { PlayerKind::Human };
                    *player = player.with_kind(seat_kind);
                }
            }
        }

        debug!(?mode, "Built seats for mode");
        Ok(Self {
            players,
            ..Self::default()
        })
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            width = config.width,
            height = config.height,
            players = config.players.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot express.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::new(format!(
                "Board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.players.len() < 2 {
            return Err(ConfigError::new(format!(
                "At least two players are required, got {}",
                self.players.len()
            )));
        }
        Ok(())
    }

    /// Overrides the board size.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Overrides the rng seed.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Overrides the computer move delay.
    pub fn set_ai_delay_ms(&mut self, delay: u64) {
        self.ai_delay_ms = delay;
    }

    /// Enables or disables seat shuffling.
    pub fn set_shuffle_seats(&mut self, shuffle: bool) {
        self.shuffle_seats = shuffle;
    }

    /// Reassigns control modes seat by seat.
    ///
    /// Seats beyond the configured players get generic names and symbols.
    pub fn set_player_kinds(&mut self, kinds: &[PlayerKind]) {
        let defaults = default_players();
        self.players = kinds
            .iter()
            .enumerate()
            .map(|(seat, kind)| match self.players.get(seat).or(defaults.get(seat)) {
                Some(player) => player.with_kind(*kind),
                None => Player::new(
                    format!("Player {}", seat + 1),
                    char::from_digit((seat + 1) as u32 % 10, 10).unwrap_or('?'),
                    "",
                    *kind,
                ),
            })
            .collect();
    }

    /// The computer move delay as a [`Duration`].
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// A registry seating the configured players in order.
    pub fn registry(&self) -> PlayerRegistry {
        PlayerRegistry::with_players(self.players.iter().cloned())
    }
}

/// Parses a comma-separated list of player kinds, e.g. `human,hard`.
///
/// # Errors
///
/// Fails on the first unrecognised label.
#[instrument]
pub fn parse_player_kinds(list: &str) -> Result<Vec<PlayerKind>, ConfigError> {
    list.split(',')
        .map(|label| PlayerKind::parse(label).map_err(|e| ConfigError::new(e.to_string())))
        .collect()
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
