//! Deterministic per-entity RNG.
//!
//! Each entity gets its own independent `SmallRng` seeded by:
//!
//!   seed = scene_seed XOR (entity_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive entity IDs uniformly across the seed space.
//! Spawning more entities never disturbs the sequences of existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::EntityId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-entity deterministic RNG, handed to behavior hooks through the
/// scene context.
pub struct EntityRng(SmallRng);

impl EntityRng {
    /// Seed deterministically from the scene seed and an entity ID.
    pub fn new(scene_seed: u64, entity: EntityId) -> Self {
        let seed = scene_seed ^ (entity.0 as u64).wrapping_mul(MIXING_CONSTANT);
        EntityRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
