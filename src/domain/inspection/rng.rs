//! Seeded pseudo-random generator and shuffle used for question selection.
//!
//! The generator is a pure function of its seed string: FNV-1a hashes the
//! seed's UTF-16 code units into a 32-bit state, and a mulberry32 step
//! function turns that state into a stream of `f64` values in `[0, 1)`.
//! Reconstructing from the same seed replays the same stream.

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hashes a seed string to the generator's initial state.
pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic generator owned by exactly one session computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRng {
    state: u32,
}

impl SessionRng {
    /// Creates a generator whose sequence depends only on `seed`.
    pub fn from_seed(seed: &str) -> Self {
        Self {
            state: hash_seed(seed),
        }
    }

    /// Returns the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / TWO_POW_32
    }

    /// Draws an index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len - 1)
    }
}

/// Fisher-Yates shuffle into a new vector; `items` is left untouched.
///
/// Consumes one draw per element except the first.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut SessionRng) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_index(i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}
