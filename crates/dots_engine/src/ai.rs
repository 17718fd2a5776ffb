//! Computer opponents.
//!
//! Three tiers of increasing care, none of which looks further ahead than
//! the opponent's next move:
//!
//! - **Easy** draws any free edge.
//! - **Medium** takes a free cell when one is available; otherwise it draws
//!   random edges and rejects those that would leave a neighbouring cell
//!   with a single free side.
//! - **Hard** scans the open cells in row-major order for a free capture
//!   and then plays exactly like Medium.
//!
//! Selectors read the board and never modify it.

use crate::{Board, Difficulty, EdgeId};
use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::{debug, instrument, trace};

/// Random draws Medium makes before settling for a risky edge.
///
/// The count includes the first draw: at most 30 candidates are looked at,
/// and if every one would gift a cell the 30th is played.
pub const MAX_SAFE_ATTEMPTS: usize = 30;

/// Picks an edge for a computer player.
///
/// Returns `None` when no edge is left; callers check
/// [`Board::is_game_over`] first.
#[instrument(skip(board, rng), fields(unclaimed = board.unclaimed_count()))]
pub fn select_ai_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<EdgeId> {
    let choice = match difficulty {
        Difficulty::Easy => random_edge(board, rng),
        Difficulty::Medium => medium(board, rng),
        Difficulty::Hard => capturing_edge(board).or_else(|| medium(board, rng)),
    };

    debug!(?choice, %difficulty, "AI selected edge");
    choice
}

fn medium<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<EdgeId> {
    capturing_edge(board).or_else(|| cautious_random_edge(board, rng))
}

/// The free side of the first open cell with exactly one free side.
#[instrument(skip_all)]
pub fn capturing_edge(board: &Board) -> Option<EdgeId> {
    board.open_cells().iter().find_map(|cell| {
        match board.unclaimed_sides(*cell).as_slice() {
            [last] => Some(*last),
            _ => None,
        }
    })
}

/// True if drawing `edge` would leave a bordering cell with at most one
/// free side, handing that cell to the next player.
pub fn gifts_cell(board: &Board, edge: EdgeId) -> bool {
    board
        .edge(edge)
        .is_some_and(|e| e.cells().any(|cell| board.unclaimed_sides(cell).len() <= 2))
}

fn random_edge<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<EdgeId> {
    board.unclaimed_edges().choose(rng)
}

fn cautious_random_edge<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<EdgeId> {
    let mut candidate = random_edge(board, rng)?;

    for attempt in 1..MAX_SAFE_ATTEMPTS {
        if !gifts_cell(board, candidate) {
            return Some(candidate);
        }
        trace!(attempt, %candidate, "Rejected edge that gifts a cell");
        candidate = random_edge(board, rng)?;
    }

    debug!(%candidate, "No safe edge found, settling for last draw");
    Some(candidate)
}
