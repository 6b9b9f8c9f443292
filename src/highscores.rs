//! High score record
//!
//! A single best score persisted under one key of a [`KeyValueStore`].
//! Loaded once when the session is created and written only when a run
//! beats it. Storage problems never reach gameplay: unreadable values load
//! as zero and failed writes are logged and dropped.

use crate::persistence::{KeyValueStore, StoreError};

/// Best score with its backing store
#[derive(Debug)]
pub struct HighScore<S: KeyValueStore> {
    best: u64,
    store: S,
}

impl<S: KeyValueStore> HighScore<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_rat_high_score";

    /// Load the stored best score (missing or corrupt values count as 0)
    pub fn load(store: S) -> Self {
        let best = store
            .get(Self::STORAGE_KEY)
            .and_then(|raw| parse_score(&raw))
            .unwrap_or(0);
        if best > 0 {
            log::info!("Loaded high score {}", best);
        } else {
            log::info!("No high score found, starting fresh");
        }
        Self { best, store }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true if it became the new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match self.save() {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
        true
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.store.set(Self::STORAGE_KEY, &self.best.to_string())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Parse a stored score; anything that isn't a non-negative integer is rejected
fn parse_score(raw: &str) -> Option<u64> {
    serde_json::from_str::<u64>(raw.trim()).ok()
}
