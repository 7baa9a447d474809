//! Boxer registry - validated access to the store

use std::sync::Arc;

use crate::boxer::{Boxer, BoxerId, NewBoxer};
use crate::error::Result;
use crate::store::BoxerStore;

/// Creates, looks up and deletes boxers
#[derive(Clone)]
pub struct Registry {
    store: Arc<dyn BoxerStore>,
}

impl Registry {
    pub fn new(store: Arc<dyn BoxerStore>) -> Self {
        Self { store }
    }

    /// Validate and register a new boxer with an empty record
    pub fn create(&self, mut new: NewBoxer) -> Result<Boxer> {
        tracing::info!(
            "Received request to create boxer: {} - {} ({})",
            new.name,
            new.weight,
            new.height
        );

        new.name = new.name.trim().to_string();
        if let Err(e) = new.validate() {
            tracing::warn!("Rejected boxer {:?}: {}", new.name, e);
            return Err(e);
        }

        let boxer = self.store.insert(new).inspect_err(|e| {
            tracing::warn!("Failed to create boxer: {}", e);
        })?;
        tracing::info!("Created boxer {} with ID {}", boxer.name, boxer.id);
        Ok(boxer)
    }

    /// Remove a boxer. Callers holding a ring must drop it from there too.
    pub fn delete(&self, id: BoxerId) -> Result<Boxer> {
        let boxer = self.store.remove(id)?;
        tracing::info!("Deleted boxer {} with ID {}", boxer.name, id);
        Ok(boxer)
    }

    pub fn get(&self, id: BoxerId) -> Result<Boxer> {
        self.store.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Boxer> {
        self.store.get_by_name(name)
    }

    /// All boxers in creation order
    pub fn list(&self) -> Vec<Boxer> {
        self.store.list()
    }

    pub(crate) fn record_bout(&self, winner: BoxerId, loser: BoxerId) -> Result<()> {
        self.store.record_bout(winner, loser)
    }
}
