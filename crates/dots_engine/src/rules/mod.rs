//! Scoring and end-of-game rules.
//!
//! Pure functions over a board and its registry, separated from board
//! storage so the controller and front ends can evaluate positions freely.

pub mod score;
pub mod winner;

pub use score::{Standing, score, standings};
pub use winner::{Outcome, outcome, winner};
