//! Flappy Dart gameplay.
//!
//! A real-time action game where the player keeps a bird airborne and guides
//! it through the gaps of scrolling obstacle pairs. Gravity pulls the bird
//! down each tick; a tap overwrites its velocity with an upward impulse.
//! Hitting an obstacle, the ground or the ceiling ends the run.

pub mod logic;
pub mod session;
pub mod types;

pub use logic::{check_collision, jump, spawn_obstacle, tick, TickOutcome};
pub use session::{GameSession, SessionEvent};
pub use types::*;
