//! Player identity and control mode.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString};
use tracing::instrument;

/// Index of a player in its [`PlayerRegistry`](crate::PlayerRegistry).
///
/// Boards record ownership by id, never by player value, so a board can be
/// inspected without the registry that produced it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display("player {_0}")]
pub struct PlayerId(pub usize);

impl PlayerId {
    /// Returns the registry index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Strength of a computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Picks any free edge.
    #[display("easy")]
    Easy,
    /// Takes free cells, otherwise avoids handing cells to the opponent.
    #[display("medium")]
    Medium,
    /// Scans for free cells first, then plays like [`Difficulty::Medium`].
    #[display("hard")]
    Hard,
}

/// Who decides a player's moves.
///
/// Parsed from stable lowercase keys (`human`, `easy`, `medium`, `hard`).
/// Localised labels belong to the presentation layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerKind {
    /// Moves are submitted from outside the engine.
    Human,
    /// Computer opponent, easy tier.
    Easy,
    /// Computer opponent, medium tier.
    Medium,
    /// Computer opponent, hard tier.
    Hard,
}

impl PlayerKind {
    /// Parses a configuration key.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePlayerKindError`] for any label that is not one of the
    /// stable keys. Unknown labels are never mapped to a default.
    #[instrument]
    pub fn parse(label: &str) -> Result<Self, ParsePlayerKindError> {
        Self::from_str(label.trim()).map_err(|_| ParsePlayerKindError::new(label))
    }

    /// Returns the AI tier, or `None` for human players.
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Easy => Some(Difficulty::Easy),
            PlayerKind::Medium => Some(Difficulty::Medium),
            PlayerKind::Hard => Some(Difficulty::Hard),
        }
    }

    /// Returns true for the three computer tiers.
    pub fn is_computer(self) -> bool {
        self.difficulty().is_some()
    }
}

impl From<Difficulty> for PlayerKind {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => PlayerKind::Easy,
            Difficulty::Medium => PlayerKind::Medium,
            Difficulty::Hard => PlayerKind::Hard,
        }
    }
}

/// An unrecognised player-kind label.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown player kind {label:?} (expected human, easy, medium or hard)")]
pub struct ParsePlayerKindError {
    /// The rejected label.
    pub label: String,
}

impl ParsePlayerKindError {
    /// Creates an error for the rejected label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// A participant in a game.
///
/// Symbol and colour are opaque to the engine and only carried through for
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    name: String,
    /// Single-character mark used when drawing owned cells.
    symbol: char,
    /// Colour label, interpreted by the front end.
    #[serde(default)]
    color: String,
    /// Control mode.
    kind: PlayerKind,
}

impl Player {
    /// Creates a player.
    pub fn new(
        name: impl Into<String>,
        symbol: char,
        color: impl Into<String>,
        kind: PlayerKind,
    ) -> Self {
        Self {
            name: name.into(),
            symbol,
            color: color.into(),
            kind,
        }
    }

    /// Returns true if the player is computer controlled.
    pub fn is_computer(&self) -> bool {
        self.kind.is_computer()
    }

    /// Returns a copy of this player with a different control mode.
    pub fn with_kind(&self, kind: PlayerKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stable_keys() {
        assert_eq!(PlayerKind::parse("human"), Ok(PlayerKind::Human));
        assert_eq!(PlayerKind::parse("easy"), Ok(PlayerKind::Easy));
        assert_eq!(PlayerKind::parse("Medium"), Ok(PlayerKind::Medium));
        assert_eq!(PlayerKind::parse(" hard "), Ok(PlayerKind::Hard));
    }

    #[test]
    fn test_parse_rejects_localised_labels() {
        let err = PlayerKind::parse("KI Schwer").unwrap_err();
        assert_eq!(err.label, "KI Schwer");
        assert!(PlayerKind::parse("").is_err());
    }

    #[test]
    fn test_difficulty_mapping() {
        assert_eq!(PlayerKind::Human.difficulty(), None);
        assert_eq!(PlayerKind::Hard.difficulty(), Some(Difficulty::Hard));
        assert_eq!(PlayerKind::from(Difficulty::Easy), PlayerKind::Easy);
        assert!(!PlayerKind::Human.is_computer());
        assert!(PlayerKind::Medium.is_computer());
    }

    #[test]
    fn test_kind_display_matches_key() {
        for kind in <PlayerKind as strum::IntoEnumIterator>::iter() {
            assert_eq!(PlayerKind::parse(&kind.to_string()), Ok(kind));
        }
    }
}
