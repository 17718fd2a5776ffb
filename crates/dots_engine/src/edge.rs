//! Claimable line segments between cells.

use crate::cell::CellId;
use crate::player::PlayerId;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Stable index of an edge in its board's edge arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display("edge #{_0}")]
pub struct EdgeId(pub usize);

impl EdgeId {
    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Direction of an edge on the dot lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Orientation {
    /// Runs left to right; the top or bottom side of a cell.
    #[display("h")]
    Horizontal,
    /// Runs top to bottom; the left or right side of a cell.
    #[display("v")]
    Vertical,
}

/// A line between two neighbouring dots.
///
/// Lattice coordinates: horizontal edge `(x, y)` is the top side of the cell
/// at `(x, y)` (or the bottom side of the last row when `y == height`);
/// vertical edge `(x, y)` is the left side of the cell at `(x, y)` (or the
/// right side of the last column when `x == width`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    orientation: Orientation,
    x: usize,
    y: usize,
    /// Above/left neighbour first, below/right neighbour second.
    cells: [Option<CellId>; 2],
    owner: Option<PlayerId>,
}

impl Edge {
    pub(crate) fn new(
        orientation: Orientation,
        x: usize,
        y: usize,
        cells: [Option<CellId>; 2],
    ) -> Self {
        Self {
            orientation,
            x,
            y,
            cells,
            owner: None,
        }
    }

    /// Returns the orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the lattice coordinates.
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Iterates the one or two cells this edge borders.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Returns true for an edge on the outer boundary.
    pub fn is_boundary(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Returns the player who drew this edge.
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Returns true once a player has drawn this edge.
    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    /// Claims the edge; a claimed edge is never reassigned.
    pub(crate) fn claim(&mut self, player: PlayerId) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(player);
        true
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.orientation, self.x, self.y)
    }
}
