//! Turn order bookkeeping.

use crate::player::{Player, PlayerId};
use derive_more::{Display, Error};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Errors raised by turn bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RegistryError {
    /// The current player was queried before the first turn advance.
    #[display("No current player: advance_turn must be called before the first move")]
    NoCurrentPlayer,
    /// A turn advance was requested with no registered players.
    #[display("No players registered")]
    NoPlayers,
}

/// Ordered list of players and whose turn it is.
///
/// Turn order is list order and wraps from the last player back to the
/// first. There is no current player until [`advance_turn`](Self::advance_turn)
/// has been called once.
///
/// Each player also keeps the seat it was registered in, so results can be
/// traced back to the original order after [`shuffle_seats`](Self::shuffle_seats).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    seats: Vec<usize>,
    current: Option<usize>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the given players in turn order.
    pub fn with_players(players: impl IntoIterator<Item = Player>) -> Self {
        let players: Vec<Player> = players.into_iter().collect();
        Self {
            seats: (0..players.len()).collect(),
            players,
            current: None,
        }
    }

    /// Appends a player and returns its id.
    #[instrument(skip(self), fields(name = %player.name()))]
    pub fn add_player(&mut self, player: Player) -> PlayerId {
        self.seats.push(self.players.len());
        self.players.push(player);
        PlayerId(self.players.len() - 1)
    }

    /// Returns all players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Iterates player ids in turn order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len()).map(PlayerId)
    }

    /// Looks up a player.
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Returns the seat `id` was registered in, before any shuffling.
    pub fn original_seat(&self, id: PlayerId) -> Option<usize> {
        self.seats.get(id.index()).copied()
    }

    /// Returns the number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if no players are registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoCurrentPlayer`] before the first
    /// [`advance_turn`](Self::advance_turn). Callers treat this as a
    /// programming error, not a recoverable state.
    pub fn current_player(&self) -> Result<PlayerId, RegistryError> {
        self.current.map(PlayerId).ok_or(RegistryError::NoCurrentPlayer)
    }

    /// Passes the turn to the next player, wrapping past the last.
    ///
    /// The first call selects the first player.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoPlayers`] if the registry is empty.
    #[instrument(skip(self), fields(current = ?self.current))]
    pub fn advance_turn(&mut self) -> Result<PlayerId, RegistryError> {
        if self.players.is_empty() {
            return Err(RegistryError::NoPlayers);
        }

        let next = match self.current {
            None => 0,
            Some(index) => (index + 1) % self.players.len(),
        };
        self.current = Some(next);

        debug!(next, "Advanced turn");
        Ok(PlayerId(next))
    }

    /// Shuffles the seating order. Only meaningful before play starts.
    #[instrument(skip(self, rng))]
    pub fn shuffle_seats<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.shuffle(rng);

        self.players = order.iter().map(|&i| self.players[i].clone()).collect();
        self.seats = order.iter().map(|&i| self.seats[i]).collect();
        self.current = None;
        debug!(?order, "Shuffled seats");
    }
}
