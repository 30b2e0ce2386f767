//! Core Connect Four game logic: gravity board, sequence/win detection, piece
//! symbols, and the game state machine.

mod board;
mod detector;
mod state;
mod symbol;

pub use board::{Board, MoveError, Observation, Position, Slot, Speculation, COLS, ROWS};
pub use detector::{Axis, WIN_LENGTH};
pub use state::{GameError, GameOutcome, GameState, Move, Phase};
pub use symbol::Symbol;

#[cfg(test)]
pub(crate) use state::tests::DRAW_SEQUENCE;
