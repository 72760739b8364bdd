//! Best-score persistence.
//!
//! The simulation only sees the [`ScoreStore`] trait. Concrete stores are
//! built by the application and injected into the session.

pub mod background;
pub mod local;
pub mod memory;
pub mod remote;

pub use background::BackgroundScoreStore;
pub use local::LocalScoreStore;
pub use memory::MemoryScoreStore;
pub use remote::{RemoteScoreStore, RemoteSettings};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque identifier of the player who owns a score.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random identifier for players without an account.
    pub fn guest() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode scores: {0}")]
    Encode(#[from] bincode::Error),
    #[error("score data is corrupt: {0}")]
    Corrupt(String),
    #[error("score service request failed: {0}")]
    Http(String),
    #[error("unexpected score service payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// A best-score table keyed by user.
///
/// `submit` inserts when the user has no score yet and otherwise updates only
/// if the new score is strictly higher.
pub trait ScoreStore: Send + Sync {
    fn submit(&self, user: &UserId, score: u32) -> Result<(), StoreError>;

    fn best_score(&self, user: &UserId) -> Result<Option<u32>, StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn submit(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        (**self).submit(user, score)
    }

    fn best_score(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        (**self).best_score(user)
    }
}

/// Report a finished run. Failures are logged and dropped; they never reach
/// the player and are never retried.
pub fn report_score(store: &dyn ScoreStore, user: &UserId, score: u32) {
    match store.submit(user, score) {
        Ok(()) => log::info!("reported score {} for {}", score, user),
        Err(e) => log::warn!("failed to report score {} for {}: {}", score, user, e),
    }
}

/// Whether `score` should replace `current` under the insert-or-raise rule.
pub(crate) fn beats(current: Option<u32>, score: u32) -> bool {
    current.map_or(true, |best| score > best)
}
