// Real-time clocks
pub const TICK_INTERVAL_MS: u64 = 16; // ~60 FPS physics
pub const DEATH_DELAY_MS: u64 = 600;
pub const MAX_FRAME_MS: u64 = 250; // cap on catch-up after a stalled frame

// Playfield (pixels)
pub const PLAYFIELD_WIDTH: f64 = 400.0;
pub const PLAYFIELD_HEIGHT: f64 = 700.0;
pub const GROUND_HEIGHT: f64 = 100.0;

// Bird
pub const BIRD_X: f64 = 80.0;
pub const BIRD_WIDTH: f64 = 40.0;
pub const BIRD_HEIGHT: f64 = 30.0;

// Obstacles
pub const OBSTACLE_WIDTH: f64 = 60.0;
pub const MIN_SEGMENT_HEIGHT: f64 = 50.0;
pub const HITBOX_MARGIN: f64 = 5.0;

// Files under ~/.flappy-dart/
pub const DATA_DIR_NAME: &str = ".flappy-dart";
pub const SETTINGS_FILE: &str = "settings.json";
pub const SCORES_FILE: &str = "scores.dat";
pub const LOG_FILE: &str = "flappy-dart.log";

// Score file format
pub const SCORES_MAGIC: u64 = 0x4644_5343_4F52_4501;

// Terminal front end
pub const FRAME_POLL_MS: u64 = 8;
