//! Grid cells and their sides.

use crate::edge::EdgeId;
use crate::player::PlayerId;
use derive_more::Display;

/// Stable index of a cell in its board's cell arena (row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("cell #{_0}")]
pub struct CellId(pub usize);

impl CellId {
    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top side.
    Top,
    /// Bottom side.
    Bottom,
    /// Left side.
    Left,
    /// Right side.
    Right,
}

impl Side {
    fn slot(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Bottom => 1,
            Side::Left => 2,
            Side::Right => 3,
        }
    }
}

/// A unit square of the grid.
///
/// Cells are identified by their grid coordinates and own nothing but
/// references into the board's edge arena. Only registered sides count when
/// deciding whether a cell is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    /// Indexed by [`Side::slot`].
    edges: [Option<EdgeId>; 4],
    owner: Option<PlayerId>,
}

impl Cell {
    pub(crate) fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            edges: [None; 4],
            owner: None,
        }
    }

    /// Returns the grid coordinates.
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Returns the edge registered on the given side.
    pub fn edge(&self, side: Side) -> Option<EdgeId> {
        self.edges[side.slot()]
    }

    /// Iterates the registered edges (top, bottom, left, right order).
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().flatten().copied()
    }

    pub(crate) fn register(&mut self, side: Side, edge: EdgeId) {
        self.edges[side.slot()] = Some(edge);
    }

    /// Returns the player who closed this cell.
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, player: PlayerId) {
        self.owner = Some(player);
    }
}
