//! Terminal rendering.

pub mod flappy_scene;

pub use flappy_scene::{render_flappy, SceneInfo};
