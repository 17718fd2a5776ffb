//! Winner determination.

use super::score::score;
use crate::{Board, PlayerId, PlayerRegistry};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One player has the strictly highest score.
    Winner(PlayerId),
    /// Several players share the highest score, in turn order.
    Tie(Vec<PlayerId>),
}

/// Player with the highest score.
///
/// Players are scanned in turn order; the leader only changes on a strictly
/// greater score, so an exact draw reports the earliest of the tied players.
/// Use [`outcome`] when a draw has to be told apart from a win.
///
/// Returns `None` only for an empty registry.
#[instrument(skip_all)]
pub fn winner(board: &Board, registry: &PlayerRegistry) -> Option<PlayerId> {
    let mut ids = registry.ids();
    let first = ids.next()?;
    let mut best = (first, score(board, first));

    for player in ids {
        let points = score(board, player);
        if points > best.1 {
            best = (player, points);
        }
    }

    Some(best.0)
}

/// Tie-aware result: the sole leader, or every player sharing the top score.
///
/// Returns `None` only for an empty registry.
#[instrument(skip_all)]
pub fn outcome(board: &Board, registry: &PlayerRegistry) -> Option<Outcome> {
    let scores: Vec<(PlayerId, usize)> = registry
        .ids()
        .map(|player| (player, score(board, player)))
        .collect();
    let top = scores.iter().map(|(_, points)| *points).max()?;

    let leaders: Vec<PlayerId> = scores
        .into_iter()
        .filter(|(_, points)| *points == top)
        .map(|(player, _)| player)
        .collect();

    match leaders.as_slice() {
        [single] => Some(Outcome::Winner(*single)),
        _ => Some(Outcome::Tie(leaders)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Orientation, Player, PlayerKind};

    fn two_players() -> PlayerRegistry {
        PlayerRegistry::with_players([
            Player::new("Cheese", 'C', "yellow", PlayerKind::Human),
            Player::new("Mouse", 'M', "grey", PlayerKind::Hard),
        ])
    }

    /// 2x1 board where each player closes one cell.
    fn drawn_board() -> Board {
        let mut board = Board::generate(2, 1).unwrap();
        let middle = board.edge_at(Orientation::Vertical, 1, 0).unwrap();
        board.apply_move(middle, PlayerId(0));

        let left: Vec<_> = board.unclaimed_sides(board.cell_id_at(0, 0).unwrap());
        for edge in left {
            board.apply_move(edge, PlayerId(0));
        }
        let right: Vec<_> = board.unclaimed_sides(board.cell_id_at(1, 0).unwrap());
        for edge in right {
            board.apply_move(edge, PlayerId(1));
        }
        board
    }

    #[test]
    fn test_single_leader_wins() {
        let mut board = Board::generate(1, 1).unwrap();
        let edges: Vec<_> = board.unclaimed_edges().collect();
        for edge in edges {
            board.apply_move(edge, PlayerId(1));
        }

        let registry = two_players();
        assert_eq!(winner(&board, &registry), Some(PlayerId(1)));
        assert_eq!(outcome(&board, &registry), Some(Outcome::Winner(PlayerId(1))));
    }

    #[test]
    fn test_exact_draw_reports_first_player() {
        let board = drawn_board();
        let registry = two_players();

        assert!(board.is_game_over());
        assert_eq!(winner(&board, &registry), Some(PlayerId(0)));
        assert_eq!(
            outcome(&board, &registry),
            Some(Outcome::Tie(vec![PlayerId(0), PlayerId(1)]))
        );
    }

    #[test]
    fn test_empty_registry_has_no_winner() {
        let board = Board::generate(1, 1).unwrap();
        assert_eq!(winner(&board, &PlayerRegistry::new()), None);
        assert_eq!(outcome(&board, &PlayerRegistry::new()), None);
    }
}
