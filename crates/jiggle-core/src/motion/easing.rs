//! Easing and wobble-window curves.

use std::f64::consts::PI;

/// Cosine ease-in-out: `e(t) = 0.5 − 0.5·cos(π·t)`.
///
/// Monotonically non-decreasing on `[0, 1]` with `e(0) = 0`, `e(1) = 1` and
/// zero slope at both ends, so a path driven by it accelerates out of the
/// start point and decelerates into the target.
pub fn ease_in_out(t: f64) -> f64 {
    0.5 - 0.5 * (PI * t).cos()
}

/// Triangular window `1 − |1 − 2t|`: 0 at both ends, 1 at the midpoint.
///
/// Multiplies the wobble so it peaks mid-path and vanishes where the path
/// starts and where it commits to the target.
pub fn mid_path_window(t: f64) -> f64 {
    (1.0 - (1.0 - 2.0 * t).abs()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ease_in_out_is_monotonic_on_unit_interval() {
        let mut previous = ease_in_out(0.0);
        for i in 1..=10_000 {
            let current = ease_in_out(i as f64 / 10_000.0);
            assert!(current >= previous, "e must not decrease at step {i}");
            previous = current;
        }
    }

    #[test]
    fn test_ease_in_out_starts_and_ends_slowly() {
        let h = 1e-3;
        let start_slope = (ease_in_out(h) - ease_in_out(0.0)) / h;
        let mid_slope = (ease_in_out(0.5 + h) - ease_in_out(0.5)) / h;
        let end_slope = (ease_in_out(1.0) - ease_in_out(1.0 - h)) / h;

        assert!(start_slope < 0.01);
        assert!(end_slope < 0.01);
        assert!(mid_slope > 1.5);
    }

    #[test]
    fn test_mid_path_window_vanishes_at_ends_and_peaks_in_middle() {
        assert_eq!(mid_path_window(0.0), 0.0);
        assert_eq!(mid_path_window(1.0), 0.0);
        assert_eq!(mid_path_window(0.5), 1.0);
        assert!((mid_path_window(0.25) - 0.5).abs() < 1e-12);
    }
}
