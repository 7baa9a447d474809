//! Arena - the single owned context tying registry, ring and resolver together
//!
//! Every ring transition and the whole resolve-and-clear sequence run while
//! holding the ring lock. Lock order is always ring, then store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::boxer::{Boxer, BoxerId, NewBoxer};
use crate::error::{Result, RingsideError};
use crate::leaderboard::{self, LeaderboardEntry, SortBy};
use crate::policy::{FightPolicy, SkillWeights};
use crate::random::RandomSource;
use crate::registry::Registry;
use crate::resolver::{self, Corner, Decision};
use crate::ring::{Ring, RingState};
use crate::store::BoxerStore;

/// Outcome of a resolved bout, with both records after the update
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FightResult {
    pub winner: Boxer,
    pub loser: Boxer,
    pub decision: Decision,
}

pub struct Arena {
    registry: Registry,
    ring: Mutex<Ring>,
    random: Box<dyn RandomSource>,
    policy: FightPolicy,
    weights: SkillWeights,
}

impl Arena {
    /// Arena with the default fight policy and skill weights
    pub fn new(store: Arc<dyn BoxerStore>, random: Box<dyn RandomSource>) -> Self {
        Self {
            registry: Registry::new(store),
            ring: Mutex::new(Ring::new()),
            random,
            policy: FightPolicy::default(),
            weights: SkillWeights::default(),
        }
    }

    pub fn with_policy(mut self, policy: FightPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_weights(mut self, weights: SkillWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn policy(&self) -> &FightPolicy {
        &self.policy
    }

    pub fn weights(&self) -> &SkillWeights {
        &self.weights
    }

    fn lock_ring(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Registry
    // ========================================================================

    pub fn create_boxer(&self, new: NewBoxer) -> Result<Boxer> {
        self.registry.create(new)
    }

    /// Delete a boxer and drop it from the ring if it is waiting there
    pub fn delete_boxer(&self, id: BoxerId) -> Result<Boxer> {
        let mut ring = self.lock_ring();
        let boxer = self.registry.delete(id)?;
        if ring.remove(id) {
            tracing::info!("Removed deleted boxer {} from the ring", id);
        }
        Ok(boxer)
    }

    pub fn get_boxer(&self, id: BoxerId) -> Result<Boxer> {
        self.registry.get(id)
    }

    pub fn get_boxer_by_name(&self, name: &str) -> Result<Boxer> {
        self.registry.get_by_name(name)
    }

    pub fn list_boxers(&self) -> Vec<Boxer> {
        self.registry.list()
    }

    // ========================================================================
    // Ring
    // ========================================================================

    /// Put a registered boxer into the ring
    pub fn enter_ring(&self, id: BoxerId) -> Result<RingState> {
        let mut ring = self.lock_ring();
        let boxer = self.registry.get(id)?;
        self.enter_locked(&mut ring, &boxer)
    }

    pub fn enter_ring_by_name(&self, name: &str) -> Result<RingState> {
        let mut ring = self.lock_ring();
        let boxer = self.registry.get_by_name(name)?;
        self.enter_locked(&mut ring, &boxer)
    }

    fn enter_locked(&self, ring: &mut Ring, boxer: &Boxer) -> Result<RingState> {
        match ring.enter(boxer, &self.policy) {
            Ok(state) => {
                tracing::info!("Boxer {} entered the ring ({:?})", boxer.name, state);
                Ok(state)
            }
            Err(e) => {
                tracing::warn!("Boxer {} could not enter the ring: {}", boxer.name, e);
                Err(e)
            }
        }
    }

    pub fn ring_state(&self) -> RingState {
        self.lock_ring().state()
    }

    /// Current occupants in entry order
    pub fn ring_boxers(&self) -> Vec<Boxer> {
        let ring = self.lock_ring();
        ring.occupants()
            .iter()
            .filter_map(|&id| self.registry.get(id).ok())
            .collect()
    }

    /// Empty the ring without touching any record
    pub fn clear_ring(&self) {
        let mut ring = self.lock_ring();
        if ring.is_empty() {
            tracing::debug!("Clearing an already empty ring");
        }
        ring.clear();
        tracing::info!("Cleared the ring");
    }

    // ========================================================================
    // Match resolution
    // ========================================================================

    /// Resolve the bout between the two ring occupants.
    ///
    /// On success both records are updated and the ring is cleared. On any
    /// error the ring and both records are left exactly as they were.
    pub fn fight(&self) -> Result<FightResult> {
        let mut ring = self.lock_ring();
        let (id_a, id_b) = ring
            .pair()
            .ok_or(RingsideError::InsufficientParticipants(ring.len()))?;

        let a = self.registry.get(id_a)?;
        let b = self.registry.get(id_b)?;

        let decision = resolver::decide(&a, &b, self.random.draw(), &self.weights);
        let (winner_id, loser_id) = match decision.winner {
            Corner::A => (id_a, id_b),
            Corner::B => (id_b, id_a),
        };

        self.registry.record_bout(winner_id, loser_id)?;
        ring.clear();

        let winner = self.registry.get(winner_id)?;
        let loser = self.registry.get(loser_id)?;
        tracing::info!(
            "{} defeated {} (P(A)={:.3}, draw={:.3})",
            winner.name,
            loser.name,
            decision.probability_a,
            decision.draw
        );

        Ok(FightResult {
            winner,
            loser,
            decision,
        })
    }

    // ========================================================================
    // Leaderboard
    // ========================================================================

    pub fn leaderboard(&self, sort_by: SortBy) -> Vec<LeaderboardEntry> {
        tracing::debug!("Building leaderboard sorted by {}", sort_by);
        leaderboard::rank(self.registry.list(), sort_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedDraw;
    use crate::store::MemoryStore;

    fn arena(draw: f64) -> Arena {
        Arena::new(Arc::new(MemoryStore::new()), Box::new(FixedDraw(draw)))
    }

    fn register(arena: &Arena, name: &str, weight: f64) -> Boxer {
        arena
            .create_boxer(NewBoxer::new(name, weight, 70.0, 70.0, 25))
            .unwrap()
    }

    #[test]
    fn test_enter_unknown_boxer() {
        let arena = arena(0.5);
        assert_eq!(arena.enter_ring(42).unwrap_err().kind(), "not_found");
        assert_eq!(arena.ring_state(), RingState::Empty);
    }

    #[test]
    fn test_fight_updates_both_records_and_clears() {
        let arena = arena(0.5);
        let a = register(&arena, "A", 150.0);
        let b = register(&arena, "B", 150.0);
        arena.enter_ring(a.id).unwrap();
        arena.enter_ring(b.id).unwrap();

        // Equal boxers: P(A) = 0.5, draw 0.5 goes to B
        let result = arena.fight().unwrap();
        assert_eq!(result.winner.id, b.id);
        assert_eq!((result.winner.wins, result.winner.fights), (1, 1));
        assert_eq!((result.loser.wins, result.loser.fights), (0, 1));
        assert_eq!(arena.ring_state(), RingState::Empty);
        assert_eq!(arena.get_boxer(b.id).unwrap().wins, 1);
    }

    #[test]
    fn test_fight_with_one_boxer() {
        let arena = arena(0.5);
        let a = register(&arena, "A", 150.0);
        arena.enter_ring(a.id).unwrap();

        let err = arena.fight().unwrap_err();
        assert_eq!(err, RingsideError::InsufficientParticipants(1));
        assert_eq!(arena.get_boxer(a.id).unwrap().fights, 0);
        assert_eq!(arena.ring_state(), RingState::One);
    }

    #[test]
    fn test_delete_cascades_to_ring() {
        let arena = arena(0.5);
        let a = register(&arena, "A", 150.0);
        let b = register(&arena, "B", 150.0);
        arena.enter_ring(a.id).unwrap();
        arena.enter_ring(b.id).unwrap();

        arena.delete_boxer(a.id).unwrap();
        let remaining: Vec<BoxerId> = arena.ring_boxers().iter().map(|x| x.id).collect();
        assert_eq!(remaining, vec![b.id]);
        assert_eq!(
            arena.fight().unwrap_err(),
            RingsideError::InsufficientParticipants(1)
        );
    }

    #[test]
    fn test_clear_ring_keeps_boxers() {
        let arena = arena(0.5);
        let a = register(&arena, "A", 150.0);
        arena.enter_ring(a.id).unwrap();
        arena.clear_ring();
        arena.clear_ring();
        assert_eq!(arena.ring_state(), RingState::Empty);
        assert!(arena.get_boxer(a.id).is_ok());
    }

    #[test]
    fn test_enter_by_name() {
        let arena = arena(0.5);
        register(&arena, "Ali", 150.0);
        assert_eq!(arena.enter_ring_by_name("Ali").unwrap(), RingState::One);
        assert_eq!(arena.enter_ring_by_name("ali").unwrap_err().kind(), "not_found");
    }

    #[test]
    fn test_custom_policy_applies() {
        let arena = arena(0.5).with_policy(FightPolicy {
            min_weight: 200.0,
            ..Default::default()
        });
        let a = register(&arena, "A", 150.0);
        assert_eq!(arena.enter_ring(a.id).unwrap_err().kind(), "eligibility");
    }
}
