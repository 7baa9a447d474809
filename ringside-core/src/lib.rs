//! Ringside Core - Match resolution and ranking engine
//!
//! This crate provides the core logic for a boxing competition:
//! - Boxer records and derived stats (win percentage, weight class)
//! - Registry with validation over a pluggable store
//! - The ring: a two-slot holding area for the next bout
//! - Match resolution from skill scores and an injected random draw
//! - Leaderboard sorted by wins or win percentage
//!
//! [`Arena`] composes all of the above and is the type transports hold.

pub mod arena;
pub mod boxer;
pub mod error;
pub mod leaderboard;
pub mod policy;
pub mod random;
pub mod registry;
pub mod resolver;
pub mod ring;
pub mod store;

// Re-exports for convenient access
pub use arena::{Arena, FightResult};
pub use boxer::{Boxer, BoxerId, NewBoxer, WeightClass};
pub use error::{Result, RingsideError};
pub use leaderboard::{LeaderboardEntry, SortBy};
pub use policy::{FightPolicy, SkillWeights};
pub use random::{FixedDraw, RandomSource, SeededRandom};
pub use registry::Registry;
pub use resolver::{skill_score, win_probability, Corner, Decision};
pub use ring::{Ring, RingState, RING_CAPACITY};
pub use store::{BoxerStore, MemoryStore};
