use crate::foundation::core::Rgb8;

/// Deterministic SplitMix64 generator used for draw-order shuffles.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 64 random bits.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "next_below bound must be > 0");
        ((u128::from(self.next_u64()) * bound as u128) >> 64) as usize
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut Rng64) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}

/// Mix a base seed with a rebuild generation so every rebuild draws a fresh stream.
pub(crate) fn mix_seed(seed: u64, generation: u64) -> u64 {
    seed ^ generation.wrapping_mul(0xD6E8_FEB8_6659_FD93)
}

/// Squared Euclidean distance in RGB space.
pub(crate) fn dist_sq(a: Rgb8, b: Rgb8) -> u32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    (dr * dr + dg * dg + db * db) as u32
}

/// `round(sum / count)` with halves rounded up. `count` must be non-zero.
pub(crate) fn rounded_mean_u8(sum: u64, count: u64) -> u8 {
    ((2 * sum + count) / (2 * count)).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
