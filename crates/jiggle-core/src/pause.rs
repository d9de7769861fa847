//! Inter-cycle pause distribution.
//!
//! Mirrors the target-distance tiers: mostly short breaks, sometimes a
//! medium one, occasionally a long gap.

use std::time::Duration;

use rand::Rng;

use crate::random::pick_weighted;
use crate::tuning::PauseTuning;

/// Draws the pause to take after a cycle.
///
/// An empty tier list yields a zero pause; [`crate::Tuning::validate`]
/// rejects that configuration before it reaches here.
pub fn sample_pause<R: Rng + ?Sized>(rng: &mut R, tuning: &PauseTuning) -> Duration {
    match pick_weighted(rng, &tuning.tiers) {
        Some(tier) => Duration::from_millis(tier.ms.sample(rng)),
        None => Duration::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Span;
    use crate::tuning::PauseTier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_pauses_fall_inside_some_tier() {
        let mut rng = StdRng::seed_from_u64(10);
        let tuning = PauseTuning::default();

        for _ in 0..2_000 {
            let ms = sample_pause(&mut rng, &tuning).as_millis() as u64;
            assert!(
                tuning.tiers.iter().any(|t| t.ms.contains(&ms)),
                "{ms}ms is outside every tier"
            );
        }
    }

    #[test]
    fn test_short_pauses_dominate() {
        let mut rng = StdRng::seed_from_u64(11);
        let tuning = PauseTuning::default();

        let short = (0..10_000)
            .filter(|_| sample_pause(&mut rng, &tuning) < Duration::from_millis(4_000))
            .count();

        // The short tier alone is 62%; its span overlaps medium a little.
        assert!(short > 5_000, "only {short} short pauses");
    }

    #[test]
    fn test_single_fixed_tier_is_exact() {
        let mut rng = StdRng::seed_from_u64(12);
        let tuning = PauseTuning {
            tiers: vec![PauseTier {
                weight: 1.0,
                ms: Span::new(250, 250),
            }],
        };

        assert_eq!(sample_pause(&mut rng, &tuning), Duration::from_millis(250));
    }

    #[test]
    fn test_empty_tiers_give_zero_pause() {
        let mut rng = StdRng::seed_from_u64(13);
        let tuning = PauseTuning { tiers: Vec::new() };

        assert_eq!(sample_pause(&mut rng, &tuning), Duration::ZERO);
    }
}
