//! Moves as first-class domain events.

use crate::{EdgeId, PlayerId};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A player drawing an edge.
///
/// Recorded in the session history and broadcast to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The player drawing the edge.
    pub player: PlayerId,
    /// The edge drawn.
    pub edge: EdgeId,
    /// Whether the move closed at least one cell.
    pub closed: bool,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.edge)?;
        if self.closed {
            write!(f, " (closed)")?;
        }
        Ok(())
    }
}
