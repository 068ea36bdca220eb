//! RNG oracle for deterministic random number generation.
//!
//! All randomness in a run (tile generation, dodge rolls, board setup,
//! transmogrification) is drawn from one [`RunRng`] seeded at level start.
//! Given the same seed and the same input sequence every draw repeats, which
//! is what makes replays and tests reproducible.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR: 64-bit state, 32-bit output).
///
/// Stateless: the caller supplies the full state as the seed, see
/// [`compute_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Independent streams drawn from the same run seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Setup = 0,
    Generator = 1,
    Combat = 2,
    Ability = 3,
}

/// Compute a deterministic seed from the run seed, a draw counter and the
/// stream the draw belongs to.
pub fn compute_seed(game_seed: u64, nonce: u64, context: RollContext) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// The single seeded random source threaded through a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRng {
    seed: u64,
    nonce: u64,
}

impl RunRng {
    pub const fn new(seed: u64) -> Self {
        Self { seed, nonce: 0 }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    pub const fn draws(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, context);
        self.nonce += 1;
        seed
    }

    pub fn next_u32(&mut self, context: RollContext) -> u32 {
        let seed = self.next_seed(context);
        PcgRng.next_u32(seed)
    }

    pub fn roll_d100(&mut self, context: RollContext) -> u32 {
        let seed = self.next_seed(context);
        PcgRng.roll_d100(seed)
    }

    /// True with probability `percent`/100.
    pub fn chance(&mut self, context: RollContext, percent: u32) -> bool {
        percent > 0 && self.roll_d100(context) <= percent
    }

    /// Uniform index in `0..len`; `None` for an empty range.
    pub fn index(&mut self, context: RollContext, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let seed = self.next_seed(context);
        Some(PcgRng.range(seed, 0, len as u32 - 1) as usize)
    }
}
