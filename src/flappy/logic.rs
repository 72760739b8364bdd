//! Game logic for Flappy Dart: physics, spawning, scoring, collision.
//!
//! Everything here is pure arithmetic over a [`RunState`]. The session in
//! `flappy::session` decides when each function runs.

use super::types::{Obstacle, RunState};
use crate::core::config::GameConfig;
use rand::Rng;

/// What happened during one physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Obstacles newly passed this tick.
    pub scored: u32,
    pub collided: bool,
}

/// Advance the run by one fixed physics step.
///
/// Order: gravity, position, scroll, despawn, scoring, collision. Position is
/// never clamped here; leaving the vertical bounds is reported as a collision.
pub fn tick(run: &mut RunState, config: &GameConfig) -> TickOutcome {
    run.ticks += 1;

    run.bird.velocity += config.gravity;
    run.bird.y += run.bird.velocity;

    for obstacle in &mut run.obstacles {
        obstacle.x -= config.obstacle_speed;
    }

    run.obstacles.retain(|o| o.right(config) >= 0.0);

    let mut scored = 0;
    for obstacle in &mut run.obstacles {
        if !obstacle.passed && obstacle.right(config) < config.bird_x {
            obstacle.passed = true;
            scored += 1;
        }
    }
    run.score += scored;

    TickOutcome {
        scored,
        collided: check_collision(run.bird.y, &run.obstacles, config),
    }
}

/// Discrete upward impulse. Overwrites velocity, so only the last jump before
/// a tick matters.
pub fn jump(run: &mut RunState, config: &GameConfig) {
    run.bird.velocity = config.jump_impulse;
}

/// Append a new obstacle at the right edge with a random gap position.
///
/// The top segment is drawn from `[min_segment, usable - gap - min_segment]`.
/// When that range is empty the gap is clamped to the lowest safe position
/// instead of failing, and neither segment goes below zero height.
pub fn spawn_obstacle<R: Rng>(run: &mut RunState, config: &GameConfig, rng: &mut R) {
    let usable = config.usable_height();
    let min_top = config.min_segment_height;
    let max_top = usable - config.gap_height - config.min_segment_height;

    let top_height = if max_top > min_top {
        rng.gen_range(min_top..=max_top)
    } else {
        min_top.min(usable - config.gap_height).max(0.0)
    };
    let bottom_height = (usable - config.gap_height - top_height).max(0.0);

    log::trace!(
        "spawned obstacle: top={:.1} bottom={:.1}",
        top_height,
        bottom_height
    );

    run.obstacles.push(Obstacle {
        x: config.playfield_width,
        top_height,
        bottom_height,
        passed: false,
    });
}

/// True if the bird at `bird_y` is out of bounds or hits any obstacle.
///
/// Bounds use the full sprite. Obstacles are tested against the sprite shrunk
/// by `hitbox_margin` on every side.
pub fn check_collision(bird_y: f64, obstacles: &[Obstacle], config: &GameConfig) -> bool {
    if bird_y < 0.0 || bird_y > config.floor_y() {
        return true;
    }

    let margin = config.hitbox_margin;
    let hit_left = config.bird_x + margin;
    let hit_right = config.bird_x + config.bird_width - margin;
    let hit_top = bird_y + margin;
    let hit_bottom = bird_y + config.bird_height - margin;

    obstacles.iter().any(|obstacle| {
        let overlaps = hit_right > obstacle.x && hit_left < obstacle.right(config);
        overlaps && (hit_top < obstacle.gap_top() || hit_bottom > obstacle.gap_bottom(config))
    })
}
