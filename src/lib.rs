//! Flappy Dart - fixed-timestep flappy-bird simulation with best-score
//! reporting.
//!
//! This module exposes the game logic for testing and for front ends.

pub mod core;
pub mod flappy;
pub mod input;
pub mod scores;
pub mod ui;
pub mod utils;

pub use crate::core::{Difficulty, GameConfig, Settings};
pub use flappy::{GameSession, RunPhase, RunState, SessionEvent};
pub use scores::{report_score, ScoreStore, StoreError, UserId};
