//! The ring: at most two boxers waiting for the next bout
//!
//! Holds boxer ids only; records stay in the registry.

use serde::{Deserialize, Serialize};

use crate::boxer::{Boxer, BoxerId};
use crate::error::{Result, RingsideError};
use crate::policy::FightPolicy;

/// Maximum number of boxers in the ring
pub const RING_CAPACITY: usize = 2;

/// Occupancy state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingState {
    Empty,
    One,
    /// Fight-ready
    Two,
}

/// Ring occupants in entry order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ring {
    occupants: Vec<BoxerId>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RingState {
        match self.occupants.len() {
            0 => RingState::Empty,
            1 => RingState::One,
            _ => RingState::Two,
        }
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn contains(&self, id: BoxerId) -> bool {
        self.occupants.contains(&id)
    }

    /// Occupant ids in entry order
    pub fn occupants(&self) -> &[BoxerId] {
        &self.occupants
    }

    /// Both corners, if the ring is fight-ready
    pub fn pair(&self) -> Option<(BoxerId, BoxerId)> {
        match self.occupants.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Add a boxer. The ring is unchanged on error.
    pub fn enter(&mut self, boxer: &Boxer, policy: &FightPolicy) -> Result<RingState> {
        if self.contains(boxer.id) {
            return Err(RingsideError::Duplicate(boxer.id));
        }
        if self.occupants.len() >= RING_CAPACITY {
            return Err(RingsideError::Capacity);
        }
        policy.check(boxer)?;

        self.occupants.push(boxer.id);
        Ok(self.state())
    }

    /// Remove one boxer if present, keeping the other's position
    pub fn remove(&mut self, id: BoxerId) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|&o| o != id);
        self.occupants.len() != before
    }

    /// Empty the ring. Idempotent.
    pub fn clear(&mut self) {
        self.occupants.clear();
    }
}
