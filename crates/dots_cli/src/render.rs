//! Plain-text board drawing.

use dots_engine::{Board, Edge, GameSummary, Orientation, Outcome, PlayerId, PlayerRegistry};
use std::fmt::Write;

fn drawn(board: &Board, orientation: Orientation, x: usize, y: usize) -> bool {
    board
        .edge_at(orientation, x, y)
        .and_then(|id| board.edge(id))
        .is_some_and(Edge::is_claimed)
}

fn symbol(registry: &PlayerRegistry, player: PlayerId) -> char {
    registry.get(player).map(|p| *p.symbol()).unwrap_or('?')
}

/// Returns a player's display name, or its id if it is not seated.
pub fn name(registry: &PlayerRegistry, player: PlayerId) -> String {
    registry
        .get(player)
        .map(|p| p.name().clone())
        .unwrap_or_else(|| player.to_string())
}

/// Draws the board with dot coordinates along the top and left.
///
/// ```text
///     0   1   2
///  0  +---+   +
///     | C |   |
///  1  +---+---+
/// ```
pub fn render_board(board: &Board, registry: &PlayerRegistry) -> String {
    let mut out = String::from("    ");
    for x in 0..=board.width() {
        let _ = write!(out, "{x:<4}");
    }
    out.push('\n');

    for y in 0..=board.height() {
        let _ = write!(out, "{y:>2}  +");
        for x in 0..board.width() {
            let line = if drawn(board, Orientation::Horizontal, x, y) { "---" } else { "   " };
            out.push_str(line);
            out.push('+');
        }
        out.push('\n');

        if y == board.height() {
            break;
        }

        out.push_str("    ");
        for x in 0..=board.width() {
            out.push(if drawn(board, Orientation::Vertical, x, y) { '|' } else { ' ' });
            if x < board.width() {
                let owner = board
                    .cell_at(x, y)
                    .and_then(|cell| cell.owner())
                    .map(|player| symbol(registry, player))
                    .unwrap_or(' ');
                let _ = write!(out, " {owner} ");
            }
        }
        out.push('\n');
    }

    out
}

/// One line with every player's score.
pub fn render_scores(summary: &GameSummary, registry: &PlayerRegistry) -> String {
    summary
        .standings
        .iter()
        .map(|standing| {
            format!(
                "{} ({}): {}",
                name(registry, standing.player),
                symbol(registry, standing.player),
                standing.score
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Announces the result of a finished game.
pub fn render_result(summary: &GameSummary, registry: &PlayerRegistry) -> String {
    match &summary.outcome {
        Outcome::Winner(player) => format!("{} wins!", name(registry, *player)),
        Outcome::Tie(players) => {
            let names: Vec<_> = players.iter().map(|p| name(registry, *p)).collect();
            format!("Tie between {}", names.join(" and "))
        }
    }
}
