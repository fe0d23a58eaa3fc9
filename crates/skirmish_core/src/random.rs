//! # Deterministic Random
//!
//! `frac(sin(seed++) * 10000)`. Weak, but identical on every client given the
//! same seed and call order. Scenery placement depends on that.

/// Multiplier applied to the sine before taking the fractional part.
const SCALE: f64 = 10_000.0;

/// Seeded pseudo-random sequence.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: u64,
}

impl SeededRandom {
    /// Creates a sequence starting at `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Returns the seed the next call will consume.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let x = (self.seed as f64).sin() * SCALE;
        self.seed = self.seed.wrapping_add(1);
        x - x.floor()
    }

    /// Integer in `[min, max]`, both ends inclusive.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        (self.next_f64() * (max - min + 1) as f64).floor() as i64 + min
    }

    /// Unsigned convenience wrapper over [`Self::range`].
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        self.range(i64::from(min), i64::from(max)) as u32
    }

    /// Same formula as [`Self::range`] with fractional bounds.
    ///
    /// `range_f64(-37.5, 37.5)` yields the half-integers `-37.5 ..= 37.5`.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        (self.next_f64() * (max - min + 1.0)).floor() + min
    }

    /// Rolls a 1-in-`n` chance. `n <= 1` always succeeds.
    pub fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.range_u32(1, n) == 1
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducible() {
        let mut a = SeededRandom::new(1);
        let mut b = SeededRandom::new(1);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_first_value_matches_formula() {
        let mut rng = SeededRandom::new(1);
        let x = 1f64.sin() * 10_000.0;
        assert_eq!(rng.next_f64(), x - x.floor());
        assert_eq!(rng.seed(), 2);
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_range_inclusive() {
        let mut rng = SeededRandom::new(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..10_000 {
            let v = rng.range(4, 10);
            assert!((4..=10).contains(&v));
            seen_min |= v == 4;
            seen_max |= v == 10;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_range_f64_half_steps() {
        let mut rng = SeededRandom::new(1);
        for _ in 0..1_000 {
            let v = rng.range_f64(-37.5, 37.5);
            assert!((-37.5..=37.5).contains(&v));
            assert_eq!(v.fract().abs(), 0.5);
        }
    }
}
