//! Randomized-distribution helpers shared by the planner, scroll and pause
//! modules.
//!
//! None of these helpers own a generator.  They all take `&mut R` so a
//! single seeded generator, owned by the caller, drives every decision in a
//! run in a fixed call order.

use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range that can be sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> Span<T> {
    /// Returns `true` if `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Returns `true` if `v` lies in `[min, max]`.
    pub fn contains(&self, v: &T) -> bool {
        *v >= self.min && *v <= self.max
    }
}

impl<T: SampleUniform + PartialOrd + Copy> Span<T> {
    /// Draws a uniform value from `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.  Spans coming from a [`crate::Tuning`] have been
    /// checked by [`crate::Tuning::validate`].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }
}

/// Draws a signed integer whose magnitude is uniform in `[min_abs, max_abs)`.
///
/// A degenerate range (`max_abs <= min_abs`) is widened to one value so the
/// call always succeeds.  The sign is a fair coin.
pub fn random_signed<R: Rng + ?Sized>(rng: &mut R, min_abs: i32, max_abs: i32) -> i32 {
    let max_abs = if max_abs <= min_abs {
        min_abs + 1
    } else {
        max_abs
    };
    let v = rng.gen_range(min_abs..max_abs);
    if rng.gen_bool(0.5) {
        -v
    } else {
        v
    }
}

/// Bernoulli draw; `p` is clamped to `[0, 1]` (NaN counts as 0).
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    rng.gen_bool(p)
}

/// Anything that takes part in a weighted tier draw.
pub trait Weighted {
    fn weight(&self) -> f64;
}

/// Picks one tier with probability proportional to its weight.
///
/// Draws `r ∈ [0, total)` and walks the cumulative weights.  Floating-point
/// rounding at the top end falls back to the last tier.  Returns `None` only
/// for an empty slice.
pub fn pick_weighted<'a, T: Weighted, R: Rng + ?Sized>(
    rng: &mut R,
    tiers: &'a [T],
) -> Option<&'a T> {
    let total: f64 = tiers.iter().map(|t| t.weight().max(0.0)).sum();
    if total <= 0.0 {
        return tiers.last();
    }
    let r = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for tier in tiers {
        cumulative += tier.weight().max(0.0);
        if r < cumulative {
            return Some(tier);
        }
    }
    tiers.last()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Tier(f64, &'static str);

    impl Weighted for Tier {
        fn weight(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_span_sample_stays_inclusive() {
        let mut rng = StdRng::seed_from_u64(7);
        let span = Span::new(3u64, 5u64);
        let mut seen = [false; 3];

        for _ in 0..500 {
            let v = span.sample(&mut rng);
            assert!(span.contains(&v));
            seen[(v - 3) as usize] = true;
        }

        assert!(seen.iter().all(|s| *s), "both endpoints must be reachable");
    }

    #[test]
    fn test_span_validity() {
        assert!(Span::new(1, 1).is_valid());
        assert!(!Span::new(2.0, 1.0).is_valid());
    }

    #[test]
    fn test_random_signed_magnitude_is_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut saw_negative = false;
        let mut saw_positive = false;

        for _ in 0..1000 {
            let v = random_signed(&mut rng, 10, 120);
            assert!((10..120).contains(&v.abs()), "magnitude {v} out of range");
            saw_negative |= v < 0;
            saw_positive |= v > 0;
        }

        assert!(saw_negative && saw_positive);
    }

    #[test]
    fn test_random_signed_degenerate_range_returns_min_magnitude() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(random_signed(&mut rng, 240, 100).abs(), 240);
        }
    }

    #[test]
    fn test_chance_extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(!chance(&mut rng, 0.0));
            assert!(chance(&mut rng, 1.0));
            assert!(chance(&mut rng, 7.5));
            assert!(!chance(&mut rng, f64::NAN));
        }
    }

    #[test]
    fn test_pick_weighted_never_picks_zero_weight_tier() {
        let mut rng = StdRng::seed_from_u64(99);
        let tiers = [Tier(0.0, "never"), Tier(1.0, "always")];

        for _ in 0..200 {
            assert_eq!(pick_weighted(&mut rng, &tiers).map(|t| t.1), Some("always"));
        }
    }

    #[test]
    fn test_pick_weighted_roughly_follows_weights() {
        let mut rng = StdRng::seed_from_u64(2024);
        let tiers = [Tier(0.7, "short"), Tier(0.2, "medium"), Tier(0.1, "long")];
        let mut short = 0;

        for _ in 0..10_000 {
            if pick_weighted(&mut rng, &tiers).map(|t| t.1) == Some("short") {
                short += 1;
            }
        }

        assert!((6_500..7_500).contains(&short), "short tier drawn {short} times");
    }

    #[test]
    fn test_pick_weighted_empty_slice_returns_none() {
        let mut rng = StdRng::seed_from_u64(0);
        let tiers: [Tier; 0] = [];
        assert!(pick_weighted(&mut rng, &tiers).is_none());
    }
}
