//! Interactive terminal game.

use crate::render::{name, render_board, render_result, render_scores};
use anyhow::{Context, Result, bail};
use dots_engine::{
    Board, GameConfig, GameController, GameEvent, MoveSubmitter, Orientation,
    PlayerRegistry, SessionEnd, SubmitError, human_move_channel,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// A line typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Draw the edge at the given lattice coordinates.
    Draw(Orientation, usize, usize),
    /// Leave the game.
    Quit,
}

/// Parses `h X Y`, `v X Y` or `q`.
pub fn parse_input(line: &str) -> Result<Input> {
    let mut parts = line.split_whitespace();
    let orientation = match parts.next() {
        Some("q" | "quit") => return Ok(Input::Quit),
        Some("h") => Orientation::Horizontal,
        Some("v") => Orientation::Vertical,
        Some(other) => bail!("Unknown command '{other}', expected h, v or q"),
        None => bail!("Empty input"),
    };

    let mut coordinate = |axis: &str| -> Result<usize> {
        parts
            .next()
            .with_context(|| format!("Missing {axis} coordinate"))?
            .parse()
            .with_context(|| format!("Invalid {axis} coordinate"))
    };
    let x = coordinate("x")?;
    let y = coordinate("y")?;

    if parts.next().is_some() {
        bail!("Too many arguments");
    }
    Ok(Input::Draw(orientation, x, y))
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    // A plain thread: a blocked stdin read must not hold up runtime shutdown.
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_event(event: &GameEvent, layout: &Board, registry: &PlayerRegistry) {
    match event {
        GameEvent::TurnStarted { player } => {
            let seat = registry.get(*player);
            println!("{}'s turn", name(registry, *player));
            if seat.is_some_and(|p| !p.is_computer()) {
                println!("Enter a move (h X Y | v X Y | q):");
            }
        }
        GameEvent::MoveMade(applied) => {
            let edge = layout
                .edge(applied.edge)
                .map(|e| e.to_string())
                .unwrap_or_else(|| applied.edge.to_string());
            println!("{} drew {edge}", name(registry, applied.player));
        }
        GameEvent::BoardChanged(board) => print!("{}", render_board(board, registry)),
        GameEvent::GameOver(summary) => {
            println!("{}", render_scores(summary, registry));
            println!("{}", render_result(summary, registry));
        }
    }
}

/// Handles one typed line. Returns false once the player quits.
fn handle_line(line: &str, layout: &Board, submitter: &MoveSubmitter) -> bool {
    match parse_input(line) {
        Ok(Input::Quit) => false,
        Ok(Input::Draw(orientation, x, y)) => {
            match layout.edge_at(orientation, x, y) {
                None => println!("No {orientation} edge at ({x}, {y})"),
                Some(edge) => match submitter.submit(edge) {
                    Ok(()) => debug!(%edge, "Submitted move"),
                    Err(SubmitError::SlotOccupied) => println!("A move is already waiting"),
                    Err(SubmitError::Closed) => println!("The game is over"),
                },
            }
            true
        }
        Err(e) => {
            println!("{e}");
            true
        }
    }
}

/// Plays one game in the terminal until it ends or the player quits.
#[instrument(skip(config), fields(width = config.width(), height = config.height()))]
pub async fn run_play(config: GameConfig) -> Result<()> {
    let (submitter, receiver) = human_move_channel();
    let (events_tx, mut events) = mpsc::unbounded_channel();

    let mut controller = GameController::from_config(&config)?
        .with_human_input(receiver)
        .with_events(events_tx);
    let stop = controller.stop_handle();
    let registry = controller.registry().clone();
    let layout = controller.board().clone();

    for (seat, player) in registry.players().iter().enumerate() {
        println!("Seat {}: {} ({}, {})", seat + 1, player.name(), player.symbol(), player.kind());
    }
    print!("{}", render_board(&layout, &registry));

    let game = tokio::spawn(async move { controller.run().await });
    let mut lines = spawn_stdin_reader();
    let mut submitter = Some(submitter);
    let has_human = registry.players().iter().any(|p| !p.is_computer());
    let mut reading = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(&event, &layout, &registry),
                None => break,
            },
            line = lines.recv(), if reading => {
                let quit = match line {
                    Some(line) => submitter
                        .as_ref()
                        .is_some_and(|tx| !handle_line(&line, &layout, tx)),
                    None => {
                        reading = false;
                        has_human
                    }
                };
                if quit {
                    info!("Player left the game");
                    reading = false;
                    stop.stop();
                    submitter = None;
                }
            }
        }
    }

    match game.await.context("Game task panicked")?? {
        SessionEnd::Finished(summary) => {
            info!(winner = %summary.winner, moves = summary.moves.len(), "Game finished");
        }
        SessionEnd::Stopped => {
            warn!("Game stopped before the board was full");
            println!("Game abandoned.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            parse_input("h 1 2").unwrap(),
            Input::Draw(Orientation::Horizontal, 1, 2)
        );
        assert_eq!(
            parse_input("  v 0 3 ").unwrap(),
            Input::Draw(Orientation::Vertical, 0, 3)
        );
        assert_eq!(parse_input("q").unwrap(), Input::Quit);
        assert_eq!(parse_input("quit").unwrap(), Input::Quit);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_input("").is_err());
        assert!(parse_input("d 1 1").is_err());
        assert!(parse_input("h 1").is_err());
        assert!(parse_input("h x 1").is_err());
        assert!(parse_input("h 1 1 1").is_err());
    }

    #[tokio::test]
    async fn test_handle_line_submits_edge() {
        let board = Board::generate(2, 2).unwrap();
        let (submitter, mut receiver) = human_move_channel();

        assert!(handle_line("v 1 0", &board, &submitter));
        let expected = board.edge_at(Orientation::Vertical, 1, 0);
        assert_eq!(receiver.receive().await, expected);
        assert!(!handle_line("q", &board, &submitter));
    }
}
