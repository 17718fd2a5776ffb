//! Unclaimed-edge ledger invariant: the free-edge set mirrors edge owners.

use super::Invariant;
use crate::{Board, EdgeId};

/// Invariant: an edge is in the unclaimed set iff it has no owner.
pub struct UnclaimedLedgerInvariant;

impl Invariant<Board> for UnclaimedLedgerInvariant {
    fn holds(board: &Board) -> bool {
        let free = board
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, edge)| !edge.is_claimed())
            .map(|(index, _)| EdgeId(index));

        free.eq(board.unclaimed_edges())
    }

    fn description() -> &'static str {
        "Unclaimed-edge set matches the edges without an owner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerId;

    #[test]
    fn test_fresh_board_holds() {
        let board = Board::generate(4, 2).unwrap();
        assert!(UnclaimedLedgerInvariant::holds(&board));
    }

    #[test]
    fn test_claimed_edges_leave_ledger() {
        let mut board = Board::generate(2, 2).unwrap();
        board.apply_move(EdgeId(0), PlayerId(0));
        board.apply_move(EdgeId(5), PlayerId(1));
        assert!(UnclaimedLedgerInvariant::holds(&board));
    }

    #[test]
    fn test_missing_free_edge_violates() {
        let mut board = Board::generate(2, 2).unwrap();
        board.corrupt_unclaimed(EdgeId(3));
        assert!(!UnclaimedLedgerInvariant::holds(&board));
    }
}
