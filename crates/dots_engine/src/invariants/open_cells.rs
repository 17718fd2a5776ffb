//! Open-cell invariant: the open list holds exactly the unclosed cells.

use super::Invariant;
use crate::{Board, CellId};

/// Invariant: a cell is in the open list iff at least one of its edges is
/// unowned, and the list stays in row-major order.
pub struct OpenCellsInvariant;

impl Invariant<Board> for OpenCellsInvariant {
    fn holds(board: &Board) -> bool {
        let expected = (0..board.cells().len())
            .map(CellId)
            .filter(|cell| !board.is_closed(*cell));

        expected.eq(board.open_cells().iter().copied())
    }

    fn description() -> &'static str {
        "Open-cell list holds exactly the cells with an unowned edge"
    }
}
