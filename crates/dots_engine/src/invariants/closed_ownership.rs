//! Closed-ownership invariant: owners only ever sit on closed cells.

use super::Invariant;
use crate::{Board, CellId};

/// Invariant: every closed cell has an owner and every owned cell is closed.
///
/// The owner of a cell must also have drawn one of its edges, since only the
/// player drawing the closing edge can receive it.
pub struct OwnedCellsClosedInvariant;

impl Invariant<Board> for OwnedCellsClosedInvariant {
    fn holds(board: &Board) -> bool {
        board.cells().iter().enumerate().all(|(index, cell)| {
            let closed = board.is_closed(CellId(index));
            match cell.owner() {
                None => !closed,
                Some(owner) => {
                    closed
                        && cell
                            .edges()
                            .any(|edge| board.edge(edge).and_then(|e| e.owner()) == Some(owner))
                }
            }
        })
    }

    fn description() -> &'static str {
        "Owned cells are closed and closed cells are owned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerId;

    #[test]
    fn test_fresh_board_holds() {
        let board = Board::generate(2, 2).unwrap();
        assert!(OwnedCellsClosedInvariant::holds(&board));
    }

    #[test]
    fn test_closing_player_owns_cell() {
        let mut board = Board::generate(1, 1).unwrap();
        let edges: Vec<_> = board.unclaimed_edges().collect();
        for (turn, edge) in edges.into_iter().enumerate() {
            board.apply_move(edge, PlayerId(turn % 3));
        }
        assert!(OwnedCellsClosedInvariant::holds(&board));
        assert_eq!(board.cell_at(0, 0).unwrap().owner(), Some(PlayerId(0)));
    }
}
