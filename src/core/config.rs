//! Tuning parameters for a run.
//!
//! Gravity, impulse, speed and hitbox values are configuration, not
//! contract. Each [`Difficulty`] preset is one consistent set; a settings
//! file can replace the whole set with its own `tuning` block.

use super::constants::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Difficulty presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Apprentice,
        Difficulty::Journeyman,
        Difficulty::Master,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Novice)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Journeyman => "Journeyman",
            Self::Master => "Master",
        }
    }

    /// Parse a CLI/settings name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    /// Gravity (velocity change per tick, px).
    pub fn gravity(&self) -> f64 {
        match self {
            Self::Novice => 0.6,
            Self::Apprentice => 0.65,
            Self::Journeyman => 0.7,
            Self::Master => 0.8,
        }
    }

    /// Jump impulse. Overwrites velocity (negative = upward).
    pub fn jump_impulse(&self) -> f64 {
        match self {
            Self::Novice => -9.0,
            Self::Apprentice => -9.5,
            Self::Journeyman => -10.0,
            Self::Master => -10.5,
        }
    }

    /// Horizontal obstacle speed in px/tick.
    pub fn obstacle_speed(&self) -> f64 {
        match self {
            Self::Novice => 3.0,
            Self::Apprentice => 3.5,
            Self::Journeyman => 4.0,
            Self::Master => 4.5,
        }
    }

    /// Vertical gap between the two segments of an obstacle.
    pub fn gap_height(&self) -> f64 {
        match self {
            Self::Novice => 200.0,
            Self::Apprentice => 185.0,
            Self::Journeyman => 170.0,
            Self::Master => 155.0,
        }
    }

    pub fn spawn_interval_ms(&self) -> u64 {
        match self {
            Self::Novice => 1600,
            Self::Apprentice => 1500,
            Self::Journeyman => 1400,
            Self::Master => 1300,
        }
    }

    /// The full tuning set for this preset.
    pub fn config(&self) -> GameConfig {
        GameConfig {
            gravity: self.gravity(),
            jump_impulse: self.jump_impulse(),
            obstacle_speed: self.obstacle_speed(),
            gap_height: self.gap_height(),
            spawn_interval_ms: self.spawn_interval_ms(),
            ..GameConfig::default()
        }
    }
}

/// One consistent set of physics, geometry and timing values.
///
/// Vertical coordinates grow downward; `y = 0` is the ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield_width: f64,
    pub playfield_height: f64,
    pub ground_height: f64,

    /// Fixed left edge of the bird.
    pub bird_x: f64,
    pub bird_width: f64,
    pub bird_height: f64,

    pub obstacle_width: f64,
    pub gap_height: f64,
    /// Smallest allowed top or bottom segment.
    pub min_segment_height: f64,
    /// Inward shrink of the bird hitbox on every side.
    pub hitbox_margin: f64,

    pub gravity: f64,
    pub jump_impulse: f64,
    pub obstacle_speed: f64,

    pub tick_interval_ms: u64,
    pub spawn_interval_ms: u64,
    pub death_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        let preset = Difficulty::Novice;
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: preset.gap_height(),
            min_segment_height: MIN_SEGMENT_HEIGHT,
            hitbox_margin: HITBOX_MARGIN,
            gravity: preset.gravity(),
            jump_impulse: preset.jump_impulse(),
            obstacle_speed: preset.obstacle_speed(),
            tick_interval_ms: TICK_INTERVAL_MS,
            spawn_interval_ms: preset.spawn_interval_ms(),
            death_delay_ms: DEATH_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Height available to the bird and obstacles (playfield minus ground).
    pub fn usable_height(&self) -> f64 {
        self.playfield_height - self.ground_height
    }

    /// Lowest allowed bird `y` before it touches the ground.
    pub fn floor_y(&self) -> f64 {
        self.usable_height() - self.bird_height
    }

    /// Bird `y` at run start: vertically centred above the ground.
    pub fn initial_bird_y(&self) -> f64 {
        self.floor_y() / 2.0
    }

    /// Reject tunings the simulation cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("obstacle_speed", self.obstacle_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.ground_height < 0.0 || self.min_segment_height < 0.0 || self.hitbox_margin < 0.0 {
            return Err(ConfigError::Invalid(
                "ground_height, min_segment_height and hitbox_margin must not be negative"
                    .to_string(),
            ));
        }
        if self.usable_height() <= self.bird_height {
            return Err(ConfigError::Invalid(
                "playfield leaves no room for the bird".to_string(),
            ));
        }
        if self.gap_height > self.usable_height() {
            return Err(ConfigError::Invalid(format!(
                "gap_height {} exceeds usable height {}",
                self.gap_height,
                self.usable_height()
            )));
        }
        if self.usable_height() - self.gap_height < 2.0 * self.min_segment_height {
            return Err(ConfigError::Invalid(format!(
                "gap_height {} leaves no room for two {} px segments",
                self.gap_height, self.min_segment_height
            )));
        }
        if self.hitbox_margin * 2.0 >= self.bird_width.min(self.bird_height) {
            return Err(ConfigError::Invalid(
                "hitbox_margin swallows the whole bird".to_string(),
            ));
        }
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(ConfigError::Invalid("gravity must be positive".to_string()));
        }
        if !self.jump_impulse.is_finite() || self.jump_impulse >= 0.0 {
            return Err(ConfigError::Invalid(
                "jump_impulse must be negative (upward)".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 || self.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick and spawn intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
