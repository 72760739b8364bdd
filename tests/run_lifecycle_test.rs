//! Integration test: full run lifecycle
//!
//! Drives a `GameSession` through NotStarted -> Running -> Dying -> Over and
//! restart, with a seeded RNG so obstacle placement is reproducible.

use flappy_dart::scores::{MemoryScoreStore, ScoreStore, StoreError, UserId};
use flappy_dart::{GameConfig, GameSession, RunPhase, SessionEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

const FRAME_MS: u64 = 16;

fn new_session() -> (GameSession, Arc<MemoryScoreStore>) {
    let store = Arc::new(MemoryScoreStore::new());
    let session = GameSession::new(GameConfig::default(), store.clone(), UserId::new("player-1"));
    (session, store)
}

/// Aim the bird's top edge 100px below the upper edge of the next gap and
/// tap whenever it sinks below that line.
fn autopilot(session: &mut GameSession) {
    let config = session.config();
    let run = session.run();
    let target = run
        .obstacles
        .iter()
        .find(|o| !o.passed)
        .map(|o| o.gap_top() + 100.0)
        .unwrap_or_else(|| config.initial_bird_y());
    if run.bird.y > target {
        session.jump();
    }
}

/// Advance frame by frame until the run is over, returning all events.
fn advance_until_over(session: &mut GameSession, rng: &mut ChaCha8Rng) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    for _ in 0..1_000 {
        events.extend(session.advance(FRAME_MS, rng));
        if session.phase().is_over() {
            break;
        }
    }
    events
}

// =============================================================================
// Falling without input
// =============================================================================

#[test]
fn test_falling_bird_descends_every_tick_until_ground() {
    let (mut session, store) = new_session();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let floor = session.config().floor_y();
    session.start();

    let mut last_y = session.run().bird.y;
    let mut crashed_at = None;
    for frame in 0..200 {
        let events = session.advance(FRAME_MS, &mut rng);
        let y = session.run().bird.y;
        assert!(y > last_y, "bird rose on frame {frame}");
        last_y = y;

        if events.contains(&SessionEvent::Crashed { score: 0 }) {
            crashed_at = Some(frame);
            break;
        }
        assert!(y <= floor, "still running below the ground");
    }

    assert!(crashed_at.is_some(), "bird never hit the ground");
    assert!(session.run().bird.y > floor);
    assert_eq!(session.phase(), RunPhase::Dying);
    assert!(!session.clocks_active());
    assert!(session.run().obstacles.is_empty());

    let events = advance_until_over(&mut session, &mut rng);
    assert_eq!(events, vec![SessionEvent::RunOver { score: 0 }]);
    assert_eq!(session.phase(), RunPhase::Over { score: 0 });
    assert_eq!(store.best_score(&UserId::new("player-1")).unwrap(), Some(0));
}

#[test]
fn test_dying_waits_for_death_delay() {
    let (mut session, store) = new_session();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    session.start();

    while session.phase() == RunPhase::Running {
        session.advance(FRAME_MS, &mut rng);
    }
    assert_eq!(session.phase(), RunPhase::Dying);

    // Frames are capped, so feed the delay in small steps.
    let delay = session.config().death_delay_ms;
    for _ in 0..delay - 1 {
        session.advance(1, &mut rng);
    }
    assert_eq!(session.phase(), RunPhase::Dying);
    assert_eq!(store.submissions(), 0);

    session.advance(1, &mut rng);
    assert_eq!(session.phase(), RunPhase::Over { score: 0 });
    assert_eq!(store.submissions(), 1);
}

#[test]
fn test_score_reported_exactly_once() {
    let (mut session, store) = new_session();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    session.start();

    advance_until_over(&mut session, &mut rng);
    for _ in 0..100 {
        session.advance(FRAME_MS, &mut rng);
    }

    assert_eq!(store.submissions(), 1);
}

#[test]
fn test_input_ignored_after_crash() {
    let (mut session, _) = new_session();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    session.start();
    while session.phase() == RunPhase::Running {
        session.advance(FRAME_MS, &mut rng);
    }

    let velocity = session.run().bird.velocity;
    session.jump();
    session.press();
    session.restart();

    assert_eq!(session.phase(), RunPhase::Dying);
    assert_eq!(session.run().bird.velocity, velocity);
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_scripted_jumps_clear_three_obstacles() {
    for seed in [1, 2, 3, 42, 1234] {
        let (mut session, store) = new_session();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        session.start();

        let mut scores = Vec::new();
        for _ in 0..3_000 {
            autopilot(&mut session);
            for event in session.advance(FRAME_MS, &mut rng) {
                if let SessionEvent::Scored { score } = event {
                    scores.push(score);
                }
            }
            assert_eq!(
                session.phase(),
                RunPhase::Running,
                "seed {seed}: crashed at tick {} with score {}",
                session.run().ticks,
                session.score()
            );
            if session.score() >= 3 {
                break;
            }
        }

        assert_eq!(session.score(), 3, "seed {seed}");
        assert_eq!(scores, vec![1, 2, 3], "seed {seed}");
        assert_eq!(store.submissions(), 0);
    }
}

#[test]
fn test_obstacles_spawn_on_their_own_clock() {
    let (mut session, _) = new_session();
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    session.start();

    let spawn_ms = session.config().spawn_interval_ms;
    let frames = 3 * spawn_ms / FRAME_MS;
    for _ in 0..frames {
        autopilot(&mut session);
        session.advance(FRAME_MS, &mut rng);
    }

    assert_eq!(session.phase(), RunPhase::Running);
    assert_eq!(session.run().ticks, frames);
    let total_spawned = session.run().obstacles.len() as u32 + session.score();
    assert_eq!(total_spawned, 3);

    let config = session.config();
    for obstacle in &session.run().obstacles {
        let total = obstacle.top_height + config.gap_height + obstacle.bottom_height;
        assert!((total - config.usable_height()).abs() < 1e-9);
    }
}

// =============================================================================
// Restart
// =============================================================================

#[test]
fn test_restart_resets_everything() {
    let (mut session, store) = new_session();
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    session.start();

    // Survive long enough for at least one obstacle, then stop flying.
    let spawn_frames = session.config().spawn_interval_ms / FRAME_MS;
    for _ in 0..spawn_frames + 10 {
        autopilot(&mut session);
        session.advance(FRAME_MS, &mut rng);
    }
    assert!(!session.run().obstacles.is_empty());

    advance_until_over(&mut session, &mut rng);
    assert!(session.phase().is_over());
    assert!(!session.clocks_active());

    session.restart();

    let config = session.config().clone();
    assert_eq!(session.phase(), RunPhase::Running);
    assert_eq!(session.run().bird.y, config.initial_bird_y());
    assert_eq!(session.run().bird.velocity, 0.0);
    assert!(session.run().obstacles.is_empty());
    assert_eq!(session.score(), 0);
    assert_eq!(session.run().ticks, 0);
    assert!(session.clocks_active());

    session.advance(FRAME_MS, &mut rng);
    assert_eq!(session.run().ticks, 1);
    assert_eq!(store.submissions(), 1);
}

#[test]
fn test_second_run_reports_again() {
    let (mut session, store) = new_session();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    session.start();
    advance_until_over(&mut session, &mut rng);
    session.restart();
    advance_until_over(&mut session, &mut rng);

    assert_eq!(store.submissions(), 2);
}

// =============================================================================
// Persistence failures
// =============================================================================

struct UnreachableStore;

impl ScoreStore for UnreachableStore {
    fn submit(&self, _user: &UserId, _score: u32) -> Result<(), StoreError> {
        Err(StoreError::Http("connection refused".to_string()))
    }

    fn best_score(&self, _user: &UserId) -> Result<Option<u32>, StoreError> {
        Err(StoreError::Http("connection refused".to_string()))
    }
}

#[test]
fn test_store_failure_does_not_block_restart() {
    let mut session = GameSession::new(
        GameConfig::default(),
        Arc::new(UnreachableStore),
        UserId::new("offline"),
    );
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    session.start();
    advance_until_over(&mut session, &mut rng);
    assert_eq!(session.phase(), RunPhase::Over { score: 0 });

    session.restart();
    assert_eq!(session.phase(), RunPhase::Running);
}
