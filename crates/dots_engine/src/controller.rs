//! Turn controller: drives a game from the first turn to the final score.

use crate::action::Move;
use crate::board::BoardError;
use crate::config::GameConfig;
use crate::handoff::MoveReceiver;
use crate::registry::RegistryError;
use crate::rules::{Outcome, Standing, outcome, standings, winner};
use crate::source::{ComputerOpponent, HumanInput, MoveSource};
use crate::{Board, EdgeId, PlayerId, PlayerRegistry};
use derive_more::{Display, Error};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Errors that end a session.
#[derive(Debug, Display, Error)]
pub enum ControllerError {
    /// Turn bookkeeping was used out of order.
    #[display("Turn error: {_0}")]
    Registry(RegistryError),
    /// The board could not be built.
    #[display("Board error: {_0}")]
    Board(BoardError),
    /// A human seat is up but no input source was attached.
    #[display("A human player is seated but no input source is attached")]
    NoHumanInput,
    /// The human input source hung up.
    #[display("Human input closed")]
    InputClosed,
    /// A computer move was requested for a human seat.
    #[display("Computer move requested for a human player")]
    NotAComputer,
    /// A computer move was requested with no free edge left.
    #[display("No free edge left to play")]
    NoMoveAvailable,
    /// The current player id is not in the registry.
    #[display("Unknown player {player}")]
    UnknownPlayer {
        /// The missing id.
        player: PlayerId,
    },
    /// Nobody is listening for game events any more.
    #[display("Event receiver dropped")]
    EventsClosed,
}

impl From<RegistryError> for ControllerError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl From<BoardError> for ControllerError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

/// Messages sent from the controller to the front end.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A player is up.
    TurnStarted {
        /// Player to move.
        player: PlayerId,
    },
    /// A move was applied.
    MoveMade(Move),
    /// Board after the latest move.
    BoardChanged(Board),
    /// Every cell is owned.
    GameOver(GameSummary),
}

/// Final result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Scores in turn order.
    pub standings: Vec<Standing>,
    /// Highest score; the earliest seat on an exact draw.
    pub winner: PlayerId,
    /// Tie-aware result.
    pub outcome: Outcome,
    /// Every applied move, in order.
    pub moves: Vec<Move>,
}

impl GameSummary {
    /// Returns true if several players share the top score.
    pub fn is_tie(&self) -> bool {
        matches!(self.outcome, Outcome::Tie(_))
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The board filled up.
    Finished(GameSummary),
    /// The session was stopped before the board filled up.
    Stopped,
}

/// Result of offering one edge to the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    /// The edge was drawn; the same player moves again iff `closed`.
    Applied(Move),
    /// The edge was already drawn or does not exist; nothing changed.
    Ignored,
}

/// Cooperative stop flag shared with the front end.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Asks the controller to stop at the next turn boundary.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Runs one game: asks the current player for an edge, applies it and
/// applies the turn rules until every cell is owned.
///
/// The controller is the only owner of the board and registry while a game
/// is running; front ends see snapshots through [`GameEvent`]s.
pub struct GameController {
    board: Board,
    registry: PlayerRegistry,
    human: Option<Box<dyn MoveSource>>,
    computer: Box<dyn MoveSource>,
    events: Option<mpsc::UnboundedSender<GameEvent>>,
    stop: StopHandle,
    history: Vec<Move>,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("board", &self.board)
            .field("registry", &self.registry)
            .field("human", &self.human.is_some())
            .field("moves", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl GameController {
    /// Creates a controller over a board and its players.
    ///
    /// Computer players use an entropy-seeded rng and no delay until
    /// [`with_computer`](Self::with_computer) replaces them.
    pub fn new(board: Board, registry: PlayerRegistry) -> Self {
        Self {
            board,
            registry,
            human: None,
            computer: Box::new(ComputerOpponent::from_entropy(std::time::Duration::ZERO)),
            events: None,
            stop: StopHandle::default(),
            history: Vec::new(),
        }
    }

    /// Builds board, seats and computer opponent from configuration.
    ///
    /// A configured seed makes seat shuffling and every computer move
    /// reproducible.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> Result<Self, ControllerError> {
        let board = Board::generate(*config.width(), *config.height())?;
        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };

        let mut registry = config.registry();
        if *config.shuffle_seats() {
            registry.shuffle_seats(&mut rng);
        }

        let computer = ComputerOpponent::new(rng.r#gen(), config.ai_delay());
        Ok(Self::new(board, registry).with_computer(computer))
    }

    /// Attaches the controller side of the human handoff.
    pub fn with_human_input(mut self, receiver: MoveReceiver) -> Self {
        self.human = Some(Box::new(HumanInput::new(receiver)));
        self
    }

    /// Replaces the source used for human seats.
    pub fn with_human_source(mut self, source: impl MoveSource + 'static) -> Self {
        self.human = Some(Box::new(source));
        self
    }

    /// Replaces the source used for computer seats.
    pub fn with_computer(mut self, source: impl MoveSource + 'static) -> Self {
        self.computer = Box::new(source);
        self
    }

    /// Sends game events to the front end.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Returns a handle that stops the game loop at the next turn boundary.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the seated players.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Returns the moves applied so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Establishes the first player if no turn has been taken yet.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<PlayerId, ControllerError> {
        match self.registry.current_player() {
            Ok(player) => Ok(player),
            Err(RegistryError::NoCurrentPlayer) => Ok(self.registry.advance_turn()?),
            Err(err) => Err(err.into()),
        }
    }

    /// Offers `edge` to the current player and applies the turn rules.
    ///
    /// A player who closes a cell keeps the turn; otherwise it passes to the
    /// next seat. An edge that is already drawn changes nothing and the same
    /// player stays up.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoCurrentPlayer`] if called before [`start`](Self::start).
    #[instrument(skip(self))]
    pub fn play_move(&mut self, edge: EdgeId) -> Result<TurnResult, ControllerError> {
        let player = self.registry.current_player()?;

        if !self.board.is_unclaimed(edge) {
            warn!(%edge, %player, "Ignoring edge that is not free");
            return Ok(TurnResult::Ignored);
        }

        let closed = self.board.apply_move(edge, player);
        let applied = Move::new(player, edge, closed);
        self.history.push(applied);

        if !closed {
            self.registry.advance_turn()?;
        }

        debug!(%applied, "Move applied");
        Ok(TurnResult::Applied(applied))
    }

    /// Scores, winner and history of the current board.
    pub fn summary(&self) -> Result<GameSummary, ControllerError> {
        let winner = winner(&self.board, &self.registry).ok_or(RegistryError::NoPlayers)?;
        let outcome = outcome(&self.board, &self.registry).ok_or(RegistryError::NoPlayers)?;
        Ok(GameSummary {
            standings: standings(&self.board, &self.registry),
            winner,
            outcome,
            moves: self.history.clone(),
        })
    }

    /// Runs the game loop until the board is full or the session is stopped.
    ///
    /// The stop flag is checked once per turn. A human turn waits for the
    /// front end without a timeout.
    #[instrument(skip(self), fields(width = self.board.width(), height = self.board.height()))]
    pub async fn run(&mut self) -> Result<SessionEnd, ControllerError> {
        info!(players = self.registry.len(), "Starting game");
        self.start()?;

        while !self.board.is_game_over() {
            if self.stop.is_stopped() {
                info!(moves = self.history.len(), "Game stopped");
                return Ok(SessionEnd::Stopped);
            }

            let player_id = self.registry.current_player()?;
            let player = self
                .registry
                .get(player_id)
                .cloned()
                .ok_or(ControllerError::UnknownPlayer { player: player_id })?;

            let source = if player.is_computer() {
                &mut self.computer
            } else {
                self.human.as_mut().ok_or(ControllerError::NoHumanInput)?
            };

            source.begin_turn();
            emit(&self.events, GameEvent::TurnStarted { player: player_id })?;

            let edge = match source.next_move(&self.board, &player).await {
                Ok(edge) => edge,
                Err(ControllerError::InputClosed) if self.stop.is_stopped() => {
                    info!("Input closed after stop request");
                    return Ok(SessionEnd::Stopped);
                }
                Err(err) => return Err(err),
            };

            if let TurnResult::Applied(applied) = self.play_move(edge)? {
                emit(&self.events, GameEvent::MoveMade(applied))?;
                emit(&self.events, GameEvent::BoardChanged(self.board.clone()))?;
            }
        }

        let summary = self.summary()?;
        info!(
            winner = %summary.winner,
            tie = summary.is_tie(),
            moves = summary.moves.len(),
            "Game over"
        );
        emit(&self.events, GameEvent::GameOver(summary.clone()))?;
        Ok(SessionEnd::Finished(summary))
    }
}

fn emit(
    events: &Option<mpsc::UnboundedSender<GameEvent>>,
    event: GameEvent,
) -> Result<(), ControllerError> {
    match events {
        Some(tx) => tx.send(event).map_err(|_| ControllerError::EventsClosed),
        None => Ok(()),
    }
}
