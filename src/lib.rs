//! # Connect Four Bot
//!
//! A fixed-depth negamax player for Connect Four on racks of any shape.
//! Given a board and a difficulty (search depth in plies) it picks the
//! column to drop the next token into. The search is exhaustive: no pruning,
//! no cache beyond the per-shape table of winning lines.
//!
//! ## Modules
//!
//! - [`game`] — Board model, player identities, game state machine
//! - [`ai`] — Quartet geometry, evaluator, negamax search, agents
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
