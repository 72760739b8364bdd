//! In-process score store for tests and offline play.

use super::{beats, ScoreStore, StoreError, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: Mutex<HashMap<UserId, u32>>,
    submissions: AtomicUsize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `submit` calls received, including ones that changed nothing.
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

impl ScoreStore for MemoryScoreStore {
    fn submit(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        let mut scores = self
            .scores
            .lock()
            .map_err(|_| StoreError::Corrupt("score table lock poisoned".to_string()))?;
        if beats(scores.get(user).copied(), score) {
            scores.insert(user.clone(), score);
        }
        Ok(())
    }

    fn best_score(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        let scores = self
            .scores
            .lock()
            .map_err(|_| StoreError::Corrupt("score table lock poisoned".to_string()))?;
        Ok(scores.get(user).copied())
    }
}
