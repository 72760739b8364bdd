//! Configuration, constants and clocks shared by the game and the front end.

pub mod config;
pub mod constants;
pub mod settings;
pub mod timer;

pub use config::{ConfigError, Difficulty, GameConfig};
pub use constants::*;
pub use settings::Settings;
pub use timer::{Countdown, Interval};
