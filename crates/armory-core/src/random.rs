//! # Randomness Source
//!
//! A single-method abstraction over randomness so that everything built on
//! top of it (codenames, probabilities, confirmation codes) is
//! deterministic under test.
//!
//! ## Why Inject Randomness?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Production                          Tests                              │
//! │                                                                         │
//! │  ┌──────────────┐                    ┌───────────────┐                  │
//! │  │ ThreadRandom │                    │ FixedSequence │                  │
//! │  │ (OS entropy) │                    │ (scripted)    │                  │
//! │  └──────┬───────┘                    └──────┬────────┘                  │
//! │         │         both implement           │                           │
//! │         └────────► RandomSource ◄──────────┘                           │
//! │                         │                                               │
//! │                         ▼                                               │
//! │        codename / probability / confirmation code                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Trait
// =============================================================================

/// Source of random integers.
///
/// The only capability generators need is "a value within an inclusive
/// range", so that is the whole interface. Implementations must be
/// thread-safe; services hold one behind an `Arc`.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `min..=max`.
    fn next_in_range(&self, min: u32, max: u32) -> u32;
}

// =============================================================================
// Production Implementation
// =============================================================================

/// The production source, backed by the thread-local RNG.
///
/// A fresh `thread_rng` handle is taken per call, so this type carries no
/// state and is trivially `Send + Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, min: u32, max: u32) -> u32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

// =============================================================================
// Deterministic Implementation
// =============================================================================

/// A scripted source for tests.
///
/// Returns the provided values in order, clamped into the requested range,
/// and cycles back to the start when exhausted.
#[derive(Debug)]
pub struct FixedSequence {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl FixedSequence {
    /// Creates a source that replays `values` in order.
    ///
    /// ## Panics
    /// Panics if `values` is empty; an empty script has no sensible
    /// behavior and always indicates a broken test setup.
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "FixedSequence needs at least one value");
        FixedSequence {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for FixedSequence {
    fn next_in_range(&self, min: u32, max: u32) -> u32 {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values[idx].clamp(min, max)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let value = rng.next_in_range(1, 100);
            assert!((1..=100).contains(&value));
        }
        // Degenerate range has exactly one answer.
        assert_eq!(rng.next_in_range(7, 7), 7);
    }

    #[test]
    fn test_fixed_sequence_replays_and_cycles() {
        let rng = FixedSequence::new(vec![3, 5, 9]);
        assert_eq!(rng.next_in_range(0, 100), 3);
        assert_eq!(rng.next_in_range(0, 100), 5);
        assert_eq!(rng.next_in_range(0, 100), 9);
        // Wraps around.
        assert_eq!(rng.next_in_range(0, 100), 3);
    }

    #[test]
    fn test_fixed_sequence_clamps_out_of_range_values() {
        let rng = FixedSequence::new(vec![0, 5000]);
        assert_eq!(rng.next_in_range(1, 100), 1);
        assert_eq!(rng.next_in_range(1, 100), 100);
    }

    #[test]
    #[should_panic(expected = "at least one value")]
    fn test_fixed_sequence_rejects_empty_script() {
        FixedSequence::new(vec![]);
    }
}
