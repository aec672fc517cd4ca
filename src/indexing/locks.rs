//! Per-repository serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Named mutual-exclusion registry: at most one indexing operation runs per
/// repository id at any time, while distinct repositories proceed in
/// parallel. Locks are created lazily and live for the process lifetime.
pub struct LockRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get or create the lock for `name`. Callers lock the returned mutex
    /// and hold the guard for the whole operation; acquisition blocks with
    /// no timeout.
    pub fn get(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(name.to_string()).or_default().clone()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
