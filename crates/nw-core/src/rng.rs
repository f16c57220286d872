//! Deterministic per-agent and episode-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! Agents never share RNG state, so the update order of agents within a tick
//! does not change any agent's draws.
//!
//! # Roll sources
//!
//! The state machine never touches `rand` directly; it draws through the
//! [`RollSource`] trait.  [`AgentRng`] is the production implementation and
//! [`FixedRoll`] replaces it when a test needs zero randomness.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RollSource ────────────────────────────────────────────────────────────────

/// The three kinds of draw the simulation needs.
pub trait RollSource {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform draw in `[lo, hi]`.  Returns `lo` when `hi <= lo`.
    fn between(&mut self, lo: f32, hi: f32) -> f32;

    /// Uniform integer in `lo..=hi`.  Returns `lo` when `hi <= lo`.
    fn int_inclusive(&mut self, lo: u8, hi: u8) -> u8;
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the episode's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

}

impl RollSource for AgentRng {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    fn between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    #[inline]
    fn int_inclusive(&mut self, lo: u8, hi: u8) -> u8 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }
}

// ── FixedRoll ─────────────────────────────────────────────────────────────────

/// A roll source that always lands at the same fraction of every range.
///
/// `FixedRoll(0.0)` always returns the low end: every probability check
/// with `p > 0` succeeds and every delay is the configured minimum.
/// `FixedRoll(0.999)` makes every probability check below 0.999 fail.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedRoll(pub f64);

impl RollSource for FixedRoll {
    fn unit(&mut self) -> f64 {
        self.0.clamp(0.0, 1.0)
    }

    fn between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.0.clamp(0.0, 1.0) as f32
    }

    fn int_inclusive(&mut self, lo: u8, hi: u8) -> u8 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as f64;
        lo + (span * self.0.clamp(0.0, 1.0)).floor() as u8
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Episode-level RNG for global draws (difficulty rolls at night start).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl RollSource for SimRng {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    fn between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    #[inline]
    fn int_inclusive(&mut self, lo: u8, hi: u8) -> u8 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }
}
