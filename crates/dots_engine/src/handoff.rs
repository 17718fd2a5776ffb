//! Single-slot handoff of human moves into the turn loop.
//!
//! The front end holds a [`MoveSubmitter`] and publishes at most one pending
//! edge at a time; the controller owns the [`MoveReceiver`] and suspends on
//! it during a human turn. Backed by a tokio channel of capacity one.

use crate::EdgeId;
use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Why a submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SubmitError {
    /// A move is already waiting to be picked up.
    #[display("A move is already pending")]
    SlotOccupied,
    /// The controller has gone away.
    #[display("The game is no longer accepting moves")]
    Closed,
}

/// Creates a connected submitter/receiver pair.
pub fn human_move_channel() -> (MoveSubmitter, MoveReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (MoveSubmitter { tx }, MoveReceiver { rx })
}

/// Front-end side of the handoff.
#[derive(Debug, Clone)]
pub struct MoveSubmitter {
    tx: mpsc::Sender<EdgeId>,
}

impl MoveSubmitter {
    /// Publishes an edge selection without blocking.
    ///
    /// # Errors
    ///
    /// [`SubmitError::SlotOccupied`] if an earlier selection has not been
    /// picked up yet, [`SubmitError::Closed`] if the controller is gone.
    #[instrument(skip(self))]
    pub fn submit(&self, edge: EdgeId) -> Result<(), SubmitError> {
        self.tx.try_send(edge).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                warn!(%edge, "Move slot occupied, submission refused");
                SubmitError::SlotOccupied
            }
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }

    /// Returns true while a submitted edge is waiting. Has no side effects.
    pub fn is_pending(&self) -> bool {
        !self.tx.is_closed() && self.tx.capacity() == 0
    }

    /// Returns true once the controller side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Controller side of the handoff.
#[derive(Debug)]
pub struct MoveReceiver {
    rx: mpsc::Receiver<EdgeId>,
}

impl MoveReceiver {
    /// Drops any selection made while no human turn was waiting.
    #[instrument(skip(self))]
    pub fn discard_stale(&mut self) -> usize {
        let mut discarded = 0;
        while self.rx.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "Discarded stale human input");
        }
        discarded
    }

    /// Waits until an edge is published. `None` once every submitter is gone.
    pub async fn receive(&mut self) -> Option<EdgeId> {
        self.rx.recv().await
    }
}
