//! Difficulty brackets and the per-decision move probability.

use std::ops::RangeInclusive;

use crate::RollSource;

/// Highest difficulty an agent can be assigned.
pub const MAX_DIFFICULTY: u8 = 20;

/// Ceiling of the per-decision move probability.
pub const MAX_MOVE_PROBABILITY: f64 = 0.30;

/// Inclusive difficulty bracket for a night.
///
/// | night | range  |
/// |-------|--------|
/// | 1     | 0–2    |
/// | 2     | 2–4    |
/// | 3     | 4–7    |
/// | 4     | 7–11   |
/// | 5     | 10–19  |
/// | other | `clamp(night * 2, 0, 20)` (a single value) |
pub fn difficulty_range(night: u32) -> RangeInclusive<u8> {
    match night {
        1 => 0..=2,
        2 => 2..=4,
        3 => 4..=7,
        4 => 7..=11,
        5 => 10..=19,
        other => {
            let level = other.saturating_mul(2).min(MAX_DIFFICULTY as u32) as u8;
            level..=level
        }
    }
}

/// Draw a difficulty for `night` from its bracket.
pub fn roll_difficulty<R: RollSource + ?Sized>(night: u32, rng: &mut R) -> u8 {
    let range = difficulty_range(night);
    rng.int_inclusive(*range.start(), *range.end())
}

/// `min(0.30, difficulty / 20 * 0.30)`.
#[inline]
pub fn base_move_probability(difficulty: u8) -> f64 {
    let scaled = difficulty as f64 / MAX_DIFFICULTY as f64 * MAX_MOVE_PROBABILITY;
    scaled.clamp(0.0, MAX_MOVE_PROBABILITY)
}
