//! Deterministic PRNG for customer and illness rolls.
//!
//! Uses the SplitMix64 algorithm: fast, 8 bytes of state, and trivially
//! seedable from a settings file so a session replays the same customers.

use crate::fixed::Fixed64;

/// SplitMix64 pseudo-random number generator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // Lemire's multiply-shift; bias is below 2^-64 per draw.
        ((self.next_u64() as u128 * bound as u128) >> 64) as u64
    }

    /// Uniform fixed-point value in `[0, upper)`. Returns zero when `upper`
    /// is not positive.
    pub fn next_fixed_below(&mut self, upper: Fixed64) -> Fixed64 {
        if upper <= Fixed64::ZERO {
            return Fixed64::ZERO;
        }
        let raw = self.next_below(upper.to_bits() as u64);
        Fixed64::from_bits(raw as i64)
    }

    /// Get the internal state (for hashing/serialization).
    pub fn state(&self) -> u64 {
        self.state
    }
}
