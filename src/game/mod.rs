//! Core Connect Four game logic: gravity-filled boards of any shape, player
//! identities, and a game state machine with immutable transitions.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Shape, STANDARD_COLUMNS, STANDARD_ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState};
