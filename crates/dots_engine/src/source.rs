//! Where moves come from: the human handoff or a computer opponent.

use crate::ai::select_ai_move;
use crate::controller::ControllerError;
use crate::handoff::MoveReceiver;
use crate::{Board, EdgeId, Player};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, instrument};

/// Trait for anything that can produce a move for the current player.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Called before the turn is announced to the front end.
    fn begin_turn(&mut self) {}

    /// Produces the edge `player` wants to draw on `board`.
    async fn next_move(&mut self, board: &Board, player: &Player)
    -> Result<EdgeId, ControllerError>;
}

/// Moves typed or clicked by a person, delivered through the handoff slot.
#[derive(Debug)]
pub struct HumanInput {
    receiver: MoveReceiver,
}

impl HumanInput {
    /// Wraps the controller side of a [`human_move_channel`](crate::human_move_channel).
    pub fn new(receiver: MoveReceiver) -> Self {
        Self { receiver }
    }
}

#[async_trait::async_trait]
impl MoveSource for HumanInput {
    fn begin_turn(&mut self) {
        self.receiver.discard_stale();
    }

    #[instrument(skip_all, fields(player = %player.name()))]
    async fn next_move(
        &mut self,
        _board: &Board,
        player: &Player,
    ) -> Result<EdgeId, ControllerError> {
        debug!("Waiting for human move");
        self.receiver
            .receive()
            .await
            .ok_or(ControllerError::InputClosed)
    }
}

/// Computer opponent playing at the tier given by each player's kind.
#[derive(Debug)]
pub struct ComputerOpponent {
    rng: StdRng,
    delay: Duration,
}

impl ComputerOpponent {
    /// Creates an opponent with a seeded rng and an announcement delay.
    pub fn new(seed: u64, delay: Duration) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            delay,
        }
    }

    /// Creates an opponent seeded from system entropy.
    pub fn from_entropy(delay: Duration) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for ComputerOpponent {
    #[instrument(skip_all, fields(player = %player.name(), kind = %player.kind()))]
    async fn next_move(
        &mut self,
        board: &Board,
        player: &Player,
    ) -> Result<EdgeId, ControllerError> {
        let difficulty = player
            .kind()
            .difficulty()
            .ok_or(ControllerError::NotAComputer)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        select_ai_move(board, difficulty, &mut self.rng).ok_or(ControllerError::NoMoveAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerKind, human_move_channel};

    #[tokio::test]
    async fn test_human_input_forwards_submission() {
        let (submitter, receiver) = human_move_channel();
        let mut input = HumanInput::new(receiver);
        let board = Board::generate(1, 1).unwrap();
        let player = Player::new("Ann", 'A', "", PlayerKind::Human);

        submitter.submit(EdgeId(2)).unwrap();
        assert_eq!(input.next_move(&board, &player).await.unwrap(), EdgeId(2));
    }

    #[tokio::test]
    async fn test_begin_turn_drops_early_input() {
        let (submitter, receiver) = human_move_channel();
        let mut input = HumanInput::new(receiver);
        submitter.submit(EdgeId(2)).unwrap();

        input.begin_turn();
        assert!(!submitter.is_pending());
    }

    #[tokio::test]
    async fn test_human_input_closed() {
        let (submitter, receiver) = human_move_channel();
        let mut input = HumanInput::new(receiver);
        drop(submitter);

        let board = Board::generate(1, 1).unwrap();
        let player = Player::new("Ann", 'A', "", PlayerKind::Human);
        assert!(matches!(
            input.next_move(&board, &player).await,
            Err(ControllerError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn test_computer_refuses_human_seat() {
        let mut computer = ComputerOpponent::new(1, Duration::ZERO);
        let board = Board::generate(2, 2).unwrap();
        let human = Player::new("Ann", 'A', "", PlayerKind::Human);
        assert!(matches!(
            computer.next_move(&board, &human).await,
            Err(ControllerError::NotAComputer)
        ));

        let easy = human.with_kind(PlayerKind::Easy);
        let edge = computer.next_move(&board, &easy).await.unwrap();
        assert!(board.is_unclaimed(edge));
    }
}
