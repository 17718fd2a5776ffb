//! The playing field: cell and edge arenas plus the move bookkeeping.

use crate::cell::{Cell, CellId, Side};
use crate::edge::{Edge, EdgeId, Orientation};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::player::PlayerId;
use derive_more::{Display, Error};
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

/// Errors that can occur when building a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Width or height was zero.
    #[display("Board dimensions must be at least 1x1, got {width}x{height}")]
    EmptyDimension {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },
}

/// Dots and Boxes board of `width` x `height` cells.
///
/// Cells and edges live in arenas and refer to each other by index. The
/// unclaimed-edge set and the open-cell list are kept in step with the
/// per-edge and per-cell owners on every move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major.
    cells: Vec<Cell>,
    /// Generation order.
    edges: Vec<Edge>,
    /// Ordered so that seeded random picks are reproducible.
    unclaimed: BTreeSet<EdgeId>,
    /// Row-major order of the cells not yet closed.
    open: Vec<CellId>,
}

impl Board {
    /// Generates a fresh board.
    ///
    /// Cells are visited row-major. Each cell creates its right and bottom
    /// edges, shared with the neighbour on that side when there is one; cells
    /// in the top row also create their top edge and cells in the left column
    /// their left edge. Every edge is therefore created exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyDimension`] if either dimension is zero.
    #[instrument]
    pub fn generate(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            warn!(width, height, "Rejected empty board dimensions");
            return Err(BoardError::EmptyDimension { width, height });
        }

        let mut cells: Vec<Cell> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
            .collect();
        let mut edges = Vec::new();
        let index = |x: usize, y: usize| CellId(y * width + x);

        for y in 0..height {
            for x in 0..width {
                let here = index(x, y);

                if y == 0 {
                    let id =
                        push_edge(&mut edges, Orientation::Horizontal, x, 0, [None, Some(here)]);
                    cells[here.index()].register(Side::Top, id);
                }

                if x == 0 {
                    let id =
                        push_edge(&mut edges, Orientation::Vertical, 0, y, [None, Some(here)]);
                    cells[here.index()].register(Side::Left, id);
                }

                let right = (x + 1 < width).then(|| index(x + 1, y));
                let id =
                    push_edge(&mut edges, Orientation::Vertical, x + 1, y, [Some(here), right]);
                cells[here.index()].register(Side::Right, id);
                if let Some(right) = right {
                    cells[right.index()].register(Side::Left, id);
                }

                let below = (y + 1 < height).then(|| index(x, y + 1));
                let id =
                    push_edge(&mut edges, Orientation::Horizontal, x, y + 1, [Some(here), below]);
                cells[here.index()].register(Side::Bottom, id);
                if let Some(below) = below {
                    cells[below.index()].register(Side::Top, id);
                }
            }
        }

        let unclaimed = (0..edges.len()).map(EdgeId).collect();
        let open = (0..cells.len()).map(CellId).collect();

        debug!(cells = cells.len(), edges = edges.len(), "Generated board");

        Ok(Self {
            width,
            height,
            cells,
            edges,
            unclaimed,
            open,
        })
    }

    /// Returns the width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns all cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns all edges in generation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up a cell by id.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Returns the id of the cell at grid coordinates `(x, y)`.
    pub fn cell_id_at(&self, x: usize, y: usize) -> Option<CellId> {
        (x < self.width && y < self.height).then(|| CellId(y * self.width + x))
    }

    /// Returns the cell at grid coordinates `(x, y)`.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cell_id_at(x, y).and_then(|id| self.cell(id))
    }

    /// Finds an edge by its lattice coordinates.
    ///
    /// Horizontal `(x, y)` is the top side of row `y` (`y == height` names the
    /// bottom boundary); vertical `(x, y)` is the left side of column `x`
    /// (`x == width` names the right boundary).
    pub fn edge_at(&self, orientation: Orientation, x: usize, y: usize) -> Option<EdgeId> {
        match orientation {
            Orientation::Horizontal if y < self.height => {
                self.cell_at(x, y).and_then(|cell| cell.edge(Side::Top))
            }
            Orientation::Horizontal if y == self.height => self
                .cell_at(x, y - 1)
                .and_then(|cell| cell.edge(Side::Bottom)),
            Orientation::Vertical if x < self.width => {
                self.cell_at(x, y).and_then(|cell| cell.edge(Side::Left))
            }
            Orientation::Vertical if x == self.width => self
                .cell_at(x - 1, y)
                .and_then(|cell| cell.edge(Side::Right)),
            _ => None,
        }
    }

    /// Iterates the edges no player has drawn yet, in id order.
    pub fn unclaimed_edges(&self) -> impl ExactSizeIterator<Item = EdgeId> + '_ {
        self.unclaimed.iter().copied()
    }

    /// Returns the number of edges still free.
    pub fn unclaimed_count(&self) -> usize {
        self.unclaimed.len()
    }

    /// Returns true if the edge exists and is still free.
    pub fn is_unclaimed(&self, edge: EdgeId) -> bool {
        self.unclaimed.contains(&edge)
    }

    /// Returns the cells with at least one free edge, row-major.
    pub fn open_cells(&self) -> &[CellId] {
        &self.open
    }

    /// Returns the free edges of a cell.
    pub fn unclaimed_sides(&self, cell: CellId) -> Vec<EdgeId> {
        self.cell(cell)
            .map(|cell| {
                cell.edges()
                    .filter(|edge| self.is_unclaimed(*edge))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns true if every registered edge of the cell is owned.
    pub fn is_closed(&self, cell: CellId) -> bool {
        self.cell(cell).is_some_and(|cell| {
            cell.edges()
                .all(|edge| self.edge(edge).is_some_and(Edge::is_claimed))
        })
    }

    /// Draws `edge` for `player` and closes every cell it completes.
    ///
    /// Drawing an edge that is already owned, or that does not exist, changes
    /// nothing and reports no closed cell. At most the two cells bordering
    /// the edge can close.
    ///
    /// Returns true if at least one cell was closed.
    #[instrument(skip(self), fields(unclaimed = self.unclaimed.len()))]
    pub fn apply_move(&mut self, edge: EdgeId, player: PlayerId) -> bool {
        let Some(target) = self.edges.get_mut(edge.index()) else {
            warn!(%edge, "Move references an edge outside the board");
            return false;
        };

        if !target.claim(player) {
            debug!(%edge, "Edge already claimed, ignoring move");
            return false;
        }

        self.unclaimed.remove(&edge);

        let candidates: Vec<CellId> = target.cells().collect();
        let mut closed = 0;
        for cell in candidates {
            let still_open = self
                .cell(cell)
                .is_some_and(|cell| cell.owner().is_none());
            if still_open && self.is_closed(cell) {
                self.cells[cell.index()].set_owner(player);
                self.open.retain(|open| *open != cell);
                closed += 1;
            }
        }

        debug!(%edge, %player, closed, "Applied move");

        debug_assert!(
            BoardInvariants::check_all(self).is_ok(),
            "board invariants violated after move"
        );

        closed > 0
    }

    /// Returns true once every cell has an owner.
    pub fn is_game_over(&self) -> bool {
        self.open.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn corrupt_unclaimed(&mut self, edge: EdgeId) {
        self.unclaimed.remove(&edge);
    }

    #[cfg(test)]
    pub(crate) fn corrupt_open(&mut self, cell: CellId) {
        self.open.retain(|open| *open != cell);
    }
}

fn push_edge(
    edges: &mut Vec<Edge>,
    orientation: Orientation,
    x: usize,
    y: usize,
    cells: [Option<CellId>; 2],
) -> EdgeId {
    let id = EdgeId(edges.len());
    edges.push(Edge::new(orientation, x, y, cells));
    id
}
