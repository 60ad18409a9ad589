//! Random byte sources
//!
//! The automaton only needs uniformly distributed bytes. The default
//! [`SplitMix`] generator is deterministic: the same seed always yields the
//! same flicker. Boards with a hardware RNG can seed it through
//! [`SplitMix::new`].

/// Seed used when nothing else is provided.
///
/// Every power-on replays the same sequence with this seed.
pub const DEFAULT_SEED: u64 = 1;

/// Source of uniformly distributed bytes
pub trait RandomSource {
    /// Next byte, uniform over `0..=255`
    fn next_byte(&mut self) -> u8;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }
}

/// `SplitMix64` generator
///
/// Small state, no multiplications wider than 64 bits and fully
/// reproducible across targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix {
    state: u64,
}

impl Default for SplitMix {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl SplitMix {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub const fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix {
    #[allow(clippy::cast_possible_truncation)]
    fn next_byte(&mut self) -> u8 {
        // Top bits are the best mixed
        (self.next_u64() >> 56) as u8
    }
}
