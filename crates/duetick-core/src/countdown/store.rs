//! Fixed-key persistence for the countdown record.

use tracing::debug;

use crate::error::StorageError;
use crate::storage::KvStore;

use super::state::{PersistedCountdownState, COUNTDOWN_STORAGE_KEY};

/// Loads and saves the countdown record under [`COUNTDOWN_STORAGE_KEY`].
///
/// A missing or unreadable record loads as `None`; first run and broken
/// storage are indistinguishable to callers.
#[derive(Debug)]
pub struct CountdownStateStore<S> {
    store: S,
}

impl<S: KvStore> CountdownStateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<PersistedCountdownState> {
        let value = self.store.get(COUNTDOWN_STORAGE_KEY)?;
        match serde_json::from_value(value) {
            Ok(state) => Some(state),
            Err(err) => {
                debug!("discarding undecodable countdown record: {err}");
                None
            }
        }
    }

    /// Full-replace write of the record.
    pub fn save(&self, state: &PersistedCountdownState) -> Result<(), StorageError> {
        let value = serde_json::to_value(state).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.store.set(COUNTDOWN_STORAGE_KEY, value)
    }
}
