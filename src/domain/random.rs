use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed values in `[0, 1)`.
///
/// Any `FnMut() -> f64` closure is a random source, which makes it easy
/// to inject a rigged or counting generator in tests.
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64 + Send,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Adapter turning any `rand` generator into a [`RandomSource`]
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl<R: Rng + Send> RandomSource for RngSource<R> {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

impl RngSource<StdRng> {
    /// Generator seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for RngSource<StdRng> {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

/// Draw a 64-bit seed for an independent sub-stream.
pub(crate) fn draw_seed(rng: &mut dyn RandomSource) -> u64 {
    (rng.next_f64() * u64::MAX as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_source() {
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            0.25
        };
        assert_eq!(source.next_f64(), 0.25);
        assert_eq!(source.next_f64(), 0.25);
        drop(source);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mut source = RngSource::seeded(42);
        for _ in 0..1000 {
            let v = source.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        for _ in 0..10 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_draw_seed_spreads() {
        let mut low = || 0.0;
        let mut high = || 0.5;
        assert_eq!(draw_seed(&mut low), 0);
        assert!(draw_seed(&mut high) > u64::MAX / 4);
    }
}
