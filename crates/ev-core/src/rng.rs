//! Deterministic per-mover and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each mover draws its static attributes (nominal speed, compliance
//! percentile) from its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids uniformly across the seed space.  Adding
//! children to a population therefore never disturbs the adults' speeds.
//!
//! Everything that depends on the population as a whole (spawn placement,
//! the per-tick activation order) goes through a single [`SimRng`] that is
//! injected into the builder and owned by the simulation afterwards.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-mover deterministic RNG, used once at construction time.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a mover id.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` distribution
    /// types (`rng.inner().sample(normal)`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
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

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for population placement and activation order.
///
/// Only used in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
