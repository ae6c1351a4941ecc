//! Rules and computer opponents for a four-in-a-row game on a 9 x 6 board.
//!
//! A [`Session`] drives one game: it takes the human's column, drops the
//! token, checks for a win or a full board, and lets the configured
//! [`Strategy`] answer. Everything it did is reported back as a
//! [`TurnOutcome`], so the caller decides what to show.
pub use board::*;
pub use errors::*;
pub use outcome::*;
pub use player::*;
pub use session::*;
pub use strategy::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod outcome;
mod player;
mod session;
mod strategy;
mod visualization;
