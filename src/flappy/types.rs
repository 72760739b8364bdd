//! Flappy Dart data structures.

use crate::core::config::GameConfig;

/// Vertical state of the bird. Its horizontal position is fixed by config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdState {
    /// Top edge in pixels (0 = ceiling, grows downward).
    pub y: f64,
    /// Pixels per tick, positive = downward.
    pub velocity: f64,
}

impl BirdState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            y: config.initial_bird_y(),
            velocity: 0.0,
        }
    }
}

/// A top + bottom obstacle pair sharing one horizontal position.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge in pixels (float for smooth scrolling).
    pub x: f64,
    pub top_height: f64,
    pub bottom_height: f64,
    /// Whether the bird has cleared this obstacle (for scoring).
    pub passed: bool,
}

impl Obstacle {
    /// Upper edge of the gap.
    pub fn gap_top(&self) -> f64 {
        self.top_height
    }

    /// Lower edge of the gap, given the configured gap height.
    pub fn gap_bottom(&self, config: &GameConfig) -> f64 {
        self.top_height + config.gap_height
    }

    pub fn right(&self, config: &GameConfig) -> f64 {
        self.x + config.obstacle_width
    }
}

/// Mutable state of one run, owned by the session for the run's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub bird: BirdState,
    /// Ordered by spawn time, which is also x order.
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Physics ticks elapsed this run.
    pub ticks: u64,
}

impl RunState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bird: BirdState::new(config),
            obstacles: Vec::new(),
            score: 0,
            ticks: 0,
        }
    }
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Waiting for the first tap. Physics paused.
    NotStarted,
    Running,
    /// Collision happened; death animation playing, clocks stopped.
    Dying,
    /// Final score reported; waiting for restart.
    Over { score: u32 },
}

impl RunPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, RunPhase::Running)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, RunPhase::Over { .. })
    }
}
