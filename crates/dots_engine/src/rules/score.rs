//! Per-player scores.

use crate::{Board, PlayerId, PlayerRegistry};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells owned by `player`.
#[instrument(skip(board))]
pub fn score(board: &Board, player: PlayerId) -> usize {
    board
        .cells()
        .iter()
        .filter(|cell| cell.owner() == Some(player))
        .count()
}

/// A player's score at some point in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Standing {
    /// The player.
    pub player: PlayerId,
    /// Cells owned.
    pub score: usize,
}

/// Scores of every registered player, in turn order.
#[instrument(skip_all)]
pub fn standings(board: &Board, registry: &PlayerRegistry) -> Vec<Standing> {
    registry
        .ids()
        .map(|player| Standing::new(player, score(board, player)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, PlayerKind};

    #[test]
    fn test_fresh_board_scores_zero() {
        let board = Board::generate(3, 3).unwrap();
        assert_eq!(score(&board, PlayerId(0)), 0);
    }

    #[test]
    fn test_standings_follow_turn_order() {
        let mut board = Board::generate(1, 1).unwrap();
        let edges: Vec<_> = board.unclaimed_edges().collect();
        for edge in edges {
            board.apply_move(edge, PlayerId(1));
        }

        let registry = PlayerRegistry::with_players([
            Player::new("a", 'A', "", PlayerKind::Human),
            Player::new("b", 'B', "", PlayerKind::Easy),
        ]);

        assert_eq!(
            standings(&board, &registry),
            vec![Standing::new(PlayerId(0), 0), Standing::new(PlayerId(1), 1)]
        );
    }
}
