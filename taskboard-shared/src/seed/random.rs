/// Injectable randomness for seeding
///
/// Every random decision made while seeding (category draws, placeholder
/// names, completion flags, due dates) goes through a `RandomSource` passed in
/// by the caller. Production wraps a `rand` generator; tests use a fixed seed
/// or a `ScriptedSource`.
///
/// # Example
///
/// ```
/// use taskboard_shared::seed::random::{RandomSource, RngSource};
///
/// let mut a = RngSource::seeded(7);
/// let mut b = RngSource::seeded(7);
/// assert_eq!(a.next_in_range(1, 3), b.next_in_range(1, 3));
/// ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random integers
pub trait RandomSource: Send {
    /// Returns a uniform integer in `low..=high`
    ///
    /// Callers guarantee `low <= high`.
    fn next_in_range(&mut self, low: usize, high: usize) -> usize;

    /// Returns true with probability `numerator / denominator`
    fn chance(&mut self, numerator: usize, denominator: usize) -> bool {
        if denominator == 0 {
            return false;
        }
        self.next_in_range(1, denominator) <= numerator
    }
}

/// `RandomSource` backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R> RngSource<R> {
    /// Wraps an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when a seed is configured, entropy otherwise
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed script of offsets
///
/// Each call takes the next scripted value `v` and returns
/// `low + v % (high - low + 1)`, cycling through the script. An empty script
/// always yields `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: Vec<usize>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, position: 0 }
    }

    /// Number of values consumed so far
    pub fn calls(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        let span = high - low + 1;
        let value = if self.script.is_empty() {
            0
        } else {
            self.script[self.position % self.script.len()]
        };
        self.position += 1;
        low + value % span
    }
}
