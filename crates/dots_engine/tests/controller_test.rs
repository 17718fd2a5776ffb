//! Tests for the async turn loop.

use dots_engine::{
    Board, ComputerOpponent, ControllerError, EdgeId, GameConfig, GameController, GameEvent,
    MoveSource, Outcome, Player, PlayerId, PlayerKind, PlayerRegistry, SessionEnd,
    human_move_channel,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

fn computers(kinds: &[PlayerKind]) -> PlayerRegistry {
    PlayerRegistry::with_players(
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Player::new(format!("cpu{i}"), 'x', "", *kind)),
    )
}

#[tokio::test]
async fn test_computer_game_runs_to_completion() {
    let board = Board::generate(4, 3).unwrap();
    let registry = computers(&[PlayerKind::Easy, PlayerKind::Medium, PlayerKind::Hard]);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut controller = GameController::new(board, registry)
        .with_computer(ComputerOpponent::new(7, Duration::ZERO))
        .with_events(tx);

    let SessionEnd::Finished(summary) = controller.run().await.unwrap() else {
        panic!("game did not finish");
    };

    assert!(controller.board().is_game_over());
    let total: usize = summary.standings.iter().map(|s| s.score).sum();
    assert_eq!(total, 12);
    assert_eq!(summary.moves.len(), controller.board().edges().len());

    let mut last = None;
    while let Ok(event) = rx.try_recv() {
        last = Some(event);
    }
    assert!(matches!(last, Some(GameEvent::GameOver(ref s)) if *s == summary));
}

#[tokio::test]
async fn test_seeded_config_is_reproducible() {
    let mut config = GameConfig::default();
    config.set_size(3, 3);
    config.set_seed(2024);
    config.set_ai_delay_ms(0);
    config.set_shuffle_seats(true);
    config.set_player_kinds(&[PlayerKind::Easy, PlayerKind::Hard]);

    let mut first = GameController::from_config(&config).unwrap();
    let mut second = GameController::from_config(&config).unwrap();

    let a = first.run().await.unwrap();
    let b = second.run().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_human_turns_follow_rules() {
    let board = Board::generate(1, 1).unwrap();
    let edges: Vec<_> = board.unclaimed_edges().collect();
    let registry = PlayerRegistry::with_players([
        Player::new("Ann", 'A', "", PlayerKind::Human),
        Player::new("Bob", 'B', "", PlayerKind::Human),
    ]);

    let (submitter, receiver) = human_move_channel();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = GameController::new(board, registry)
        .with_human_input(receiver)
        .with_events(tx);

    let game = tokio::spawn(async move { controller.run().await });

    let mut submitted = edges.iter();
    let mut turns = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            GameEvent::TurnStarted { player } => {
                turns.push(player);
                // Re-offering a drawn edge must not cost the turn.
                if turns.len() == 2 {
                    submitter.submit(edges[0]).unwrap();
                } else if let Some(edge) = submitted.next() {
                    submitter.submit(*edge).unwrap();
                }
            }
            GameEvent::GameOver(summary) => {
                assert_eq!(summary.outcome, Outcome::Winner(PlayerId(1)));
                break;
            }
            _ => {}
        }
    }

    assert!(matches!(game.await.unwrap(), Ok(SessionEnd::Finished(_))));
    assert_eq!(
        turns,
        vec![
            PlayerId(0),
            PlayerId(1),
            PlayerId(1),
            PlayerId(0),
            PlayerId(1)
        ]
    );
}

#[tokio::test]
async fn test_capture_keeps_turn_in_loop() {
    let board = Board::generate(2, 1).unwrap();
    let left = board.cell_id_at(0, 0).unwrap();
    let mut order = board.unclaimed_sides(left);
    let right = board.cell_id_at(1, 0).unwrap();
    let extra: Vec<_> = board
        .unclaimed_sides(right)
        .into_iter()
        .filter(|e| !order.contains(e))
        .collect();
    order.extend(extra);
    let registry = PlayerRegistry::with_players([
        Player::new("Ann", 'A', "", PlayerKind::Human),
        Player::new("Bob", 'B', "", PlayerKind::Human),
    ]);

    let (submitter, receiver) = human_move_channel();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = GameController::new(board, registry)
        .with_human_input(receiver)
        .with_events(tx);
    let game = tokio::spawn(async move { controller.run().await });

    let mut moves = order.into_iter();
    let mut made = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            GameEvent::TurnStarted { .. } => {
                if let Some(edge) = moves.next() {
                    submitter.submit(edge).unwrap();
                }
            }
            GameEvent::MoveMade(applied) => made.push(applied),
            GameEvent::GameOver(_) => break,
            GameEvent::BoardChanged(_) => {}
        }
    }
    game.await.unwrap().unwrap();

    // The fourth edge closes the left cell, so the same player draws the fifth.
    assert!(made[3].closed);
    assert_eq!(made[3].player, made[4].player);
    assert_eq!(made.len(), 7);
}

#[tokio::test]
async fn test_stop_ends_session() {
    let board = Board::generate(3, 3).unwrap();
    let registry = PlayerRegistry::with_players([
        Player::new("Ann", 'A', "", PlayerKind::Human),
        Player::new("Cpu", 'C', "", PlayerKind::Hard),
    ]);
    let (submitter, receiver) = human_move_channel();
    let mut controller = GameController::new(board, registry).with_human_input(receiver);
    let stop = controller.stop_handle();

    stop.stop();
    drop(submitter);
    assert_eq!(controller.run().await.unwrap(), SessionEnd::Stopped);
}

#[tokio::test]
async fn test_stop_while_waiting_for_human() {
    let board = Board::generate(2, 2).unwrap();
    let registry = PlayerRegistry::with_players([
        Player::new("Ann", 'A', "", PlayerKind::Human),
        Player::new("Bob", 'B', "", PlayerKind::Human),
    ]);
    let (submitter, receiver) = human_move_channel();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = GameController::new(board, registry)
        .with_human_input(receiver)
        .with_events(tx);
    let stop = controller.stop_handle();
    let game = tokio::spawn(async move { controller.run().await });

    assert!(matches!(rx.recv().await, Some(GameEvent::TurnStarted { .. })));
    stop.stop();
    drop(submitter);

    assert_eq!(game.await.unwrap().unwrap(), SessionEnd::Stopped);
}

#[tokio::test]
async fn test_closed_input_is_an_error() {
    let board = Board::generate(2, 2).unwrap();
    let registry = PlayerRegistry::with_players([
        Player::new("Ann", 'A', "", PlayerKind::Human),
        Player::new("Bob", 'B', "", PlayerKind::Human),
    ]);
    let (submitter, receiver) = human_move_channel();
    drop(submitter);

    let mut controller = GameController::new(board, registry).with_human_input(receiver);
    assert!(matches!(
        controller.run().await,
        Err(ControllerError::InputClosed)
    ));
}

#[tokio::test]
async fn test_human_seat_without_input() {
    let board = Board::generate(1, 1).unwrap();
    let registry = PlayerRegistry::with_players([
        Player::new("Ann", 'A', "", PlayerKind::Human),
        Player::new("Bob", 'B', "", PlayerKind::Easy),
    ]);
    let mut controller = GameController::new(board, registry);
    assert!(matches!(
        controller.run().await,
        Err(ControllerError::NoHumanInput)
    ));
}

/// Human seat that replays a fixed list of edges.
struct ScriptedHuman {
    moves: VecDeque<EdgeId>,
    turns: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl MoveSource for ScriptedHuman {
    fn begin_turn(&mut self) {
        self.turns.fetch_add(1, Ordering::SeqCst);
    }

    async fn next_move(
        &mut self,
        _board: &Board,
        _player: &Player,
    ) -> Result<EdgeId, ControllerError> {
        self.moves.pop_front().ok_or(ControllerError::InputClosed)
    }
}

#[tokio::test]
async fn test_custom_human_source_drives_human_seats() {
    let board = Board::generate(1, 1).unwrap();
    let edges: Vec<_> = board.unclaimed_edges().collect();
    let registry = PlayerRegistry::with_players([
        Player::new("Ann", 'A', "", PlayerKind::Human),
        Player::new("Bob", 'B', "", PlayerKind::Human),
    ]);
    let turns = Arc::new(AtomicUsize::new(0));
    let script = ScriptedHuman {
        moves: edges.iter().copied().collect(),
        turns: Arc::clone(&turns),
    };

    let mut controller = GameController::new(board, registry).with_human_source(script);
    let SessionEnd::Finished(summary) = controller.run().await.unwrap() else {
        panic!("game did not finish");
    };

    let played: Vec<_> = summary.moves.iter().map(|m| (m.player, m.edge)).collect();
    let expected: Vec<_> = edges
        .iter()
        .enumerate()
        .map(|(turn, edge)| (PlayerId(turn % 2), *edge))
        .collect();
    assert_eq!(played, expected);
    assert_eq!(summary.outcome, Outcome::Winner(PlayerId(1)));
    assert_eq!(turns.load(Ordering::SeqCst), 4);
}
