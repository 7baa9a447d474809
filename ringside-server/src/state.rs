//! Server state management
//!
//! One arena per process, plus the optional snapshot file it persists to.

use anyhow::Context;
use ringside_core::{Arena, MemoryStore, RandomSource, SeededRandom};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ServerConfig;

/// Server-wide shared state
pub struct ServerState {
    pub arena: Arena,
    store: Arc<MemoryStore>,
    data_file: Option<PathBuf>,
    /// Held for the whole read-then-write of a snapshot
    save_lock: Arc<Mutex<()>>,
}

impl ServerState {
    /// Build state from configuration, loading the snapshot if there is one
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = match &config.data_file {
            Some(path) => MemoryStore::load_or_new(path)
                .with_context(|| format!("Failed to load boxers from {}", path.display()))?,
            None => MemoryStore::new(),
        };
        let store = Arc::new(store);
        let arena = Arena::new(store.clone(), Box::new(SeededRandom::new(config.seed)))
            .with_policy(config.policy.clone());

        Ok(Self {
            arena,
            store,
            data_file: config.data_file.clone(),
            save_lock: Arc::default(),
        })
    }

    /// In-memory state with a caller-supplied randomness source
    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            arena: Arena::new(store.clone(), random),
            store,
            data_file: None,
            save_lock: Arc::default(),
        }
    }

    /// Write the snapshot after a mutation. Failures are logged, not returned:
    /// the mutation itself already succeeded.
    ///
    /// Saves are serialized and each one reads the store inside the lock, so
    /// the file only ever moves forward to a newer state.
    pub async fn persist(&self) {
        let Some(path) = self.data_file.clone() else {
            return;
        };
        let store = self.store.clone();
        let save_lock = self.save_lock.clone();

        let saved = tokio::task::spawn_blocking(move || {
            let _guard = save_lock.lock().unwrap_or_else(PoisonError::into_inner);
            store.save(&path).map_err(|e| (path, e))
        })
        .await;

        match saved {
            Ok(Ok(())) => {}
            Ok(Err((path, e))) => {
                tracing::error!("Failed to save boxers to {}: {:#}", path.display(), e)
            }
            Err(e) => tracing::error!("Snapshot task failed: {}", e),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::with_random(Box::new(SeededRandom::from_entropy()))
    }
}
