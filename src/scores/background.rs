//! Fire-and-forget submission.
//!
//! The end-of-run report must not stall the game loop on disk or network I/O,
//! so `submit` hands the write to a worker thread and returns at once.

use super::{ScoreStore, StoreError, UserId};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

pub struct BackgroundScoreStore<S> {
    inner: Arc<S>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl<S: ScoreStore + 'static> BackgroundScoreStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Wait for every outstanding submit. Called once at shutdown so a score
    /// reported right before quitting still lands.
    pub fn flush(&self) {
        let handles = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return,
        };
        for handle in handles {
            if handle.join().is_err() {
                log::warn!("score submit worker panicked");
            }
        }
    }
}

impl<S: ScoreStore + 'static> ScoreStore for BackgroundScoreStore<S> {
    fn submit(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        let inner = Arc::clone(&self.inner);
        let user = user.clone();
        let handle = std::thread::spawn(move || {
            if let Err(e) = inner.submit(&user, score) {
                log::warn!("background submit of {} for {} failed: {}", score, user, e);
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
        Ok(())
    }

    fn best_score(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        self.inner.best_score(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::memory::MemoryScoreStore;

    #[test]
    fn test_submit_lands_after_flush() {
        let store = BackgroundScoreStore::new(MemoryScoreStore::new());
        let user = UserId::new("bg");

        store.submit(&user, 9).unwrap();
        store.flush();

        assert_eq!(store.best_score(&user).unwrap(), Some(9));
    }

    #[test]
    fn test_inner_failure_still_returns_ok() {
        struct Broken;
        impl ScoreStore for Broken {
            fn submit(&self, _: &UserId, _: u32) -> Result<(), StoreError> {
                Err(StoreError::Http("down".to_string()))
            }
            fn best_score(&self, _: &UserId) -> Result<Option<u32>, StoreError> {
                Ok(None)
            }
        }

        let store = BackgroundScoreStore::new(Broken);
        assert!(store.submit(&UserId::new("x"), 1).is_ok());
        store.flush();
    }
}
