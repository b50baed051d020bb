// Injectable uniform random source for the draw, reroll and turn shuffle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform indices.
///
/// Every random decision in the engine goes through this trait so tests can
/// substitute a fixed sequence.
pub trait RandomSource {
    /// Return an index uniformly distributed in `0..upper`. `upper` is never 0.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Adapter from any `rand` generator to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }
}

impl RngSource<StdRng> {
    /// Seeded generator; the same seed replays the same draft.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        RngSource(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, upper: usize) -> usize {
        self.0.random_range(0..upper)
    }
}

/// Replays a fixed list of picks, each reduced modulo the requested bound.
///
/// Wraps around once the list is exhausted; an empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        ScriptedSource {
            picks: picks.into(),
            cursor: 0,
        }
    }

    /// Number of picks consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, upper: usize) -> usize {
        if self.picks.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let raw = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        raw % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_replays_and_wraps() {
        let mut src = ScriptedSource::new(vec![3, 1, 7]);
        assert_eq!(src.pick(10), 3);
        assert_eq!(src.pick(10), 1);
        assert_eq!(src.pick(5), 2);
        assert_eq!(src.pick(10), 3);
        assert_eq!(src.consumed(), 4);
    }

    #[test]
    fn empty_script_yields_zero() {
        let mut src = ScriptedSource::default();
        assert_eq!(src.pick(4), 0);
        assert_eq!(src.pick(1), 0);
    }

    #[test]
    fn seeded_source_is_reproducible_and_bounded() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for upper in 1..50 {
            let x = a.pick(upper);
            assert_eq!(x, b.pick(upper));
            assert!(x < upper);
        }
    }
}
