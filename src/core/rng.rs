//! Deterministic random number generation stored inside the snapshot.
//!
//! The snapshot never holds a live generator. It holds a [`GameRngState`]
//! checkpoint (seed plus ChaCha8 word position), and every random draw
//! restores a [`GameRng`], draws, and writes the advanced checkpoint back.
//! Replaying the same inputs from the same snapshot therefore reproduces
//! the same draws, even across a process restart.
//!
//! ```
//! use ccg_rules::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let checkpoint = a.state();
//! let first = a.gen_range_usize(0..100);
//!
//! let mut b = GameRng::from_state(&checkpoint);
//! assert_eq!(b.gen_range_usize(0..100), first);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generate a random usize in the given range.
    ///
    /// Panics on an empty range, like `rand`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Pick a uniformly random index into a collection of `len` items.
    ///
    /// Returns `None` when `len` is zero.
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl GameRngState {
    /// Checkpoint of a fresh generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        GameRng::new(seed).state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_checkpoint_resumes_sequence() {
        let mut rng = GameRng::new(7);
        rng.gen_range_usize(0..10);
        let checkpoint = rng.state();
        let expected: Vec<_> = (0..5).map(|_| rng.gen_range_usize(0..1000)).collect();

        let mut restored = GameRng::from_state(&checkpoint);
        let actual: Vec<_> = (0..5).map(|_| restored.gen_range_usize(0..1000)).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_choose_index_empty() {
        let mut rng = GameRng::new(3);
        assert_eq!(rng.choose_index(0), None);
        assert!(rng.choose_index(4).unwrap() < 4);
    }

    #[test]
    fn test_state_serialization() {
        let state = GameRngState::seeded(99);
        let bytes = bincode::serialize(&state).unwrap();
        let back: GameRngState = bincode::deserialize(&bytes).unwrap();
        assert_eq!(state, back);
    }
}
