//! Deterministic RNG for scramble generation.
//!
//! PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output. Given the same seed
//! the generated scramble is identical, which keeps scrambles replayable in
//! tests; callers that want entropy seed it from the outside.

/// Small deterministic PCG generator.
#[derive(Clone, Copy, Debug)]
pub struct ScrambleRng {
    state: u64,
}

impl ScrambleRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 32-bit output, advancing the LCG state one step.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);

        // XSH-RR output permutation: xorshift high bits, random rotate.
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform value in `0..bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        self.next_u32() % bound
    }
}
