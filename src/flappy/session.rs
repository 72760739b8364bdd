//! Run lifecycle: `NotStarted -> Running -> Dying -> Over`.
//!
//! A [`GameSession`] exclusively owns the [`RunState`] and drives it from two
//! decoupled clocks: the physics tick and the obstacle spawn. On the first
//! collision both clocks stop together and a death countdown starts. When the
//! countdown finishes the run is over and the final score is reported once to
//! the injected [`ScoreStore`].

use super::logic;
use super::types::{RunPhase, RunState};
use crate::core::config::GameConfig;
use crate::core::constants::MAX_FRAME_MS;
use crate::core::timer::{Countdown, Interval};
use crate::scores::{report_score, ScoreStore, UserId};
use rand::Rng;
use std::sync::Arc;

/// Something the front end may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Score changed to the contained value.
    Scored { score: u32 },
    /// First collision of the run; death animation begins.
    Crashed { score: u32 },
    /// Death animation finished and the score was reported.
    RunOver { score: u32 },
}

pub struct GameSession {
    config: GameConfig,
    run: RunState,
    phase: RunPhase,
    tick_clock: Interval,
    spawn_clock: Interval,
    death_timer: Countdown,
    store: Arc<dyn ScoreStore>,
    user: UserId,
}

impl GameSession {
    /// `config` is used as given; run it through [`GameConfig::validate`]
    /// first when it comes from outside the presets.
    pub fn new(config: GameConfig, store: Arc<dyn ScoreStore>, user: UserId) -> Self {
        Self {
            run: RunState::new(&config),
            phase: RunPhase::NotStarted,
            tick_clock: Interval::new(config.tick_interval_ms),
            spawn_clock: Interval::new(config.spawn_interval_ms),
            death_timer: Countdown::default(),
            config,
            store,
            user,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// True while either gameplay clock is running.
    pub fn clocks_active(&self) -> bool {
        self.tick_clock.is_active() || self.spawn_clock.is_active()
    }

    /// Begin a run that has not started yet.
    pub fn start(&mut self) {
        if self.phase != RunPhase::NotStarted {
            return;
        }
        self.phase = RunPhase::Running;
        self.tick_clock.start();
        self.spawn_clock.start();
        log::info!("run started for {}", self.user);
    }

    /// Upward impulse. Ignored unless the run is in progress.
    pub fn jump(&mut self) {
        if self.phase.is_running() {
            logic::jump(&mut self.run, &self.config);
        }
    }

    /// The single tap input: starts a fresh run or jumps.
    pub fn press(&mut self) {
        match self.phase {
            RunPhase::NotStarted => self.start(),
            RunPhase::Running => self.jump(),
            RunPhase::Dying | RunPhase::Over { .. } => {}
        }
    }

    /// Reset every entity and start a new run. Only valid once the previous
    /// run is over.
    pub fn restart(&mut self) {
        if !self.phase.is_over() {
            return;
        }
        self.reset();
        self.start();
    }

    /// Return to `NotStarted` with fresh entities and stopped clocks.
    pub fn reset(&mut self) {
        self.run = RunState::new(&self.config);
        self.phase = RunPhase::NotStarted;
        self.stop_clocks();
        self.death_timer.disarm();
    }

    /// Move the session forward by `dt_ms` of wall-clock time.
    ///
    /// Clock firings are processed in chronological order; a spawn and a tick
    /// due at the same instant run spawn first.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let mut remaining = dt_ms.min(MAX_FRAME_MS);

        while remaining > 0 {
            let next = [
                self.tick_clock.until_next(),
                self.spawn_clock.until_next(),
                self.death_timer.until_done(),
            ]
            .into_iter()
            .flatten()
            .min();

            let Some(next) = next else {
                break;
            };
            let step = next.min(remaining);
            remaining -= step;

            let spawn_due = self.spawn_clock.advance(step);
            let tick_due = self.tick_clock.advance(step);
            let death_done = self.death_timer.advance(step);

            if spawn_due {
                logic::spawn_obstacle(&mut self.run, &self.config, rng);
            }
            if tick_due {
                self.step(&mut events);
            }
            if death_done {
                self.finish(&mut events);
            }
        }

        events
    }

    fn step(&mut self, events: &mut Vec<SessionEvent>) {
        if !self.phase.is_running() {
            return;
        }

        let outcome = logic::tick(&mut self.run, &self.config);
        if outcome.scored > 0 {
            log::debug!("score {}", self.run.score);
            events.push(SessionEvent::Scored {
                score: self.run.score,
            });
        }

        if outcome.collided {
            self.phase = RunPhase::Dying;
            self.stop_clocks();
            self.death_timer.arm(self.config.death_delay_ms);
            log::info!(
                "crashed after {} ticks with score {}",
                self.run.ticks,
                self.run.score
            );
            events.push(SessionEvent::Crashed {
                score: self.run.score,
            });
        }
    }

    fn finish(&mut self, events: &mut Vec<SessionEvent>) {
        if self.phase != RunPhase::Dying {
            return;
        }
        let score = self.run.score;
        self.phase = RunPhase::Over { score };
        report_score(self.store.as_ref(), &self.user, score);
        events.push(SessionEvent::RunOver { score });
    }

    fn stop_clocks(&mut self) {
        self.tick_clock.stop();
        self.spawn_clock.stop();
    }
}
