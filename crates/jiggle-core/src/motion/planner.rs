//! MotionPlanner: turns "cursor is here, screen is this big" into a lazily
//! computed human-looking path toward a random nearby target.
//!
//! # How a movement is synthesised
//!
//! 1. **Target.**  A weighted draw picks a distance tier (short, medium,
//!    long).  Each axis gets an independent signed offset inside the tier's
//!    reach, and the result is clamped into the inset rectangle
//!    `[margin, dim-margin]` so targets never sit on the extreme edge.
//!
//! 2. **Main path.**  For step `i` in `1..=steps`, with `t = i/steps`:
//!
//!    ```text
//!    p(i) = lerp(start, target, ease_in_out(t))
//!         + amplitude · sin(2π·frequency·t + phase) · window(t)
//!         + jitter            (every step except the last)
//!    ```
//!
//!    The window is zero at both ends, so the last main-path point lands on
//!    the target exactly.  Every point is clamped to the full screen.
//!
//! 3. **Micro-corrections.**  Zero to a few extra points within a couple of
//!    pixels of the target, like a hand settling the pointer.
//!
//! Every point carries the delay to wait after moving there: a short step
//! delay, occasionally stretched by a hesitation bonus.
//!
//! # Laziness
//!
//! [`MotionPlan`] borrows the caller's generator and computes one point per
//! `next()` call.  Abandoning it half way (on cancellation or a failed move)
//! simply stops drawing random numbers; nothing is materialised up front.

use std::f64::consts::TAU;
use std::iter::FusedIterator;
use std::time::Duration;

use rand::Rng;

use crate::domain::geometry::{Point, ScreenBounds};
use crate::motion::easing::{ease_in_out, mid_path_window};
use crate::random::{chance, pick_weighted, random_signed, Span};
use crate::tuning::MotionTuning;

/// Which part of a movement a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    /// Eased, wobbled travel toward the target.
    Main,
    /// Small settling offset around the reached target.
    Correction,
}

/// One point of a [`MotionPlan`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Where to move the cursor.
    pub point: Point,
    /// How long to wait after the move.
    pub delay: Duration,
    /// `true` if `delay` includes a hesitation bonus.
    pub hesitated: bool,
    pub segment: PathSegment,
}

/// Stateless planner; all randomness comes from the generator passed to
/// [`MotionPlanner::plan`].
#[derive(Debug, Clone, Default)]
pub struct MotionPlanner {
    tuning: MotionTuning,
}

impl MotionPlanner {
    /// Creates a planner.  `tuning` is expected to have passed
    /// [`crate::Tuning::validate`].
    pub fn new(tuning: MotionTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &MotionTuning {
        &self.tuning
    }

    /// Picks a random target near `from`, clamped into the inset rectangle.
    pub fn pick_target<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        from: Point,
        bounds: ScreenBounds,
    ) -> Point {
        let Some(tier) = pick_weighted(rng, &self.tuning.tiers) else {
            return bounds.clamp_inset(from, self.tuning.margin);
        };
        let dx = random_signed(rng, tier.x.min_abs, tier.x.max_abs(bounds.width));
        let dy = random_signed(rng, tier.y.min_abs, tier.y.max_abs(bounds.height));
        bounds.clamp_inset(from.offset(dx, dy), self.tuning.margin)
    }

    /// Starts a movement from `from`.
    ///
    /// Draws the target, step count, wobble parameters and correction count
    /// immediately; everything else is drawn as the plan is iterated.
    pub fn plan<'a, R: Rng + ?Sized>(
        &'a self,
        rng: &'a mut R,
        from: Point,
        bounds: ScreenBounds,
    ) -> MotionPlan<'a, R> {
        let target = self.pick_target(rng, from, bounds);
        let steps = self.tuning.steps.sample(rng).max(1);
        let wobble = Wobble {
            amplitude_x: self.tuning.wobble_amplitude.sample(rng),
            amplitude_y: self.tuning.wobble_amplitude.sample(rng),
            frequency: self.tuning.wobble_frequency.sample(rng),
            phase: rng.gen_range(0.0..TAU),
        };
        let corrections = self.tuning.micro_corrections.sample(rng);

        MotionPlan {
            tuning: &self.tuning,
            rng,
            from,
            target,
            bounds,
            steps,
            wobble,
            corrections,
            step: 0,
            corrections_done: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Wobble {
    amplitude_x: f64,
    amplitude_y: f64,
    frequency: f64,
    phase: f64,
}

impl Wobble {
    fn offset(&self, t: f64) -> (f64, f64) {
        let wave = (TAU * self.frequency * t + self.phase).sin() * mid_path_window(t);
        (self.amplitude_x * wave, self.amplitude_y * wave)
    }
}

/// A single movement, produced one point at a time.
///
/// Finite and non-restartable: it yields `steps` main-path points followed
/// by the micro-corrections, then `None` forever.
pub struct MotionPlan<'a, R: ?Sized> {
    tuning: &'a MotionTuning,
    rng: &'a mut R,
    from: Point,
    target: Point,
    bounds: ScreenBounds,
    steps: u32,
    wobble: Wobble,
    corrections: u32,
    step: u32,
    corrections_done: u32,
}

impl<R: Rng + ?Sized> MotionPlan<'_, R> {
    pub fn start(&self) -> Point {
        self.from
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Number of main-path steps.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Number of micro-correction points after the main path.
    pub fn corrections(&self) -> u32 {
        self.corrections
    }

    fn main_point(&mut self, i: u32) -> Point {
        let t = f64::from(i) / f64::from(self.steps);
        let e = ease_in_out(t);
        let (wx, wy) = self.wobble.offset(t);

        let x = f64::from(self.from.x) + f64::from(self.target.x - self.from.x) * e + wx;
        let y = f64::from(self.from.y) + f64::from(self.target.y - self.from.y) * e + wy;
        let mut p = Point::new(x.round() as i32, y.round() as i32);

        if i < self.steps {
            let jx = self.tuning.jitter.sample(&mut *self.rng);
            let jy = self.tuning.jitter.sample(&mut *self.rng);
            p = p.offset(jx, jy);
        }
        self.bounds.clamp(p)
    }

    fn correction_point(&mut self) -> Point {
        let dx = self.tuning.correction_offset.sample(&mut *self.rng);
        let dy = self.tuning.correction_offset.sample(&mut *self.rng);
        self.bounds.clamp(self.target.offset(dx, dy))
    }

    fn with_delay(&mut self, point: Point, segment: PathSegment) -> PathPoint {
        let (delay, hesitated) = step_delay(
            &mut *self.rng,
            self.tuning.step_delay_ms,
            self.tuning.hesitation_probability,
            self.tuning.hesitation_ms,
        );
        PathPoint {
            point,
            delay,
            hesitated,
            segment,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for MotionPlan<'_, R> {
    type Item = PathPoint;

    fn next(&mut self) -> Option<PathPoint> {
        if self.step < self.steps {
            self.step += 1;
            let point = self.main_point(self.step);
            return Some(self.with_delay(point, PathSegment::Main));
        }
        if self.corrections_done < self.corrections {
            self.corrections_done += 1;
            let point = self.correction_point();
            return Some(self.with_delay(point, PathSegment::Correction));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining =
            (self.steps - self.step) as usize + (self.corrections - self.corrections_done) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for MotionPlan<'_, R> {}

impl<R: Rng + ?Sized> FusedIterator for MotionPlan<'_, R> {}

/// Draws a per-point delay: a base step delay plus, with a small
/// probability, a hesitation bonus.  Returns the delay and whether the bonus
/// was applied.
pub fn step_delay<R: Rng + ?Sized>(
    rng: &mut R,
    base_ms: Span<u64>,
    hesitation_probability: f64,
    hesitation_ms: Span<u64>,
) -> (Duration, bool) {
    let mut ms = base_ms.sample(rng);
    let hesitated = chance(rng, hesitation_probability);
    if hesitated {
        ms += hesitation_ms.sample(rng);
    }
    (Duration::from_millis(ms), hesitated)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn planner() -> MotionPlanner {
        MotionPlanner::new(MotionTuning::default())
    }

    #[test]
    fn test_targets_on_800x600_stay_inside_margin() {
        // Arrange
        let planner = planner();
        let bounds = ScreenBounds::new(800, 600);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..5_000 {
            // Act
            let target = planner.pick_target(&mut rng, Point::new(400, 300), bounds);

            // Assert
            assert!((10..=790).contains(&target.x), "x out of margin: {target}");
            assert!((10..=590).contains(&target.y), "y out of margin: {target}");
        }
    }

    #[test]
    fn test_targets_from_corners_are_pulled_inside_margin() {
        let planner = planner();
        let bounds = ScreenBounds::new(1920, 1080);
        let mut rng = StdRng::seed_from_u64(8);
        let corners = [
            Point::new(0, 0),
            Point::new(1919, 0),
            Point::new(0, 1079),
            Point::new(1919, 1079),
        ];

        for corner in corners {
            for _ in 0..500 {
                let t = planner.pick_target(&mut rng, corner, bounds);
                assert!((10..=1910).contains(&t.x));
                assert!((10..=1070).contains(&t.y));
            }
        }
    }

    #[test]
    fn test_step_count_is_within_configured_range() {
        let planner = planner();
        let bounds = ScreenBounds::new(800, 600);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..1_000 {
            let plan = planner.plan(&mut rng, Point::new(400, 300), bounds);
            assert!((18..=65).contains(&plan.steps()), "steps = {}", plan.steps());
            assert!(plan.corrections() <= 2);
        }
    }

    #[test]
    fn test_plan_yields_steps_then_corrections() {
        let planner = planner();
        let bounds = ScreenBounds::new(800, 600);
        let mut rng = StdRng::seed_from_u64(77);

        let plan = planner.plan(&mut rng, Point::new(400, 300), bounds);
        let steps = plan.steps() as usize;
        let corrections = plan.corrections() as usize;
        assert_eq!(plan.len(), steps + corrections);

        let points: Vec<PathPoint> = plan.collect();

        assert_eq!(points.len(), steps + corrections);
        assert!(points[..steps]
            .iter()
            .all(|p| p.segment == PathSegment::Main));
        assert!(points[steps..]
            .iter()
            .all(|p| p.segment == PathSegment::Correction));
    }

    #[test]
    fn test_last_main_point_lands_on_target() {
        let planner = planner();
        let bounds = ScreenBounds::new(1280, 720);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..200 {
            let mut plan = planner.plan(&mut rng, Point::new(640, 360), bounds);
            let target = plan.target();
            let steps = plan.steps() as usize;

            let last_main = plan.by_ref().take(steps).last().expect("non-empty path");

            assert_eq!(last_main.point, target);
        }
    }

    #[test]
    fn test_corrections_stay_close_to_target() {
        let planner = planner();
        let bounds = ScreenBounds::new(1280, 720);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..300 {
            let plan = planner.plan(&mut rng, Point::new(100, 100), bounds);
            let target = plan.target();
            for p in plan.filter(|p| p.segment == PathSegment::Correction) {
                assert!((p.point.x - target.x).abs() <= 3);
                assert!((p.point.y - target.y).abs() <= 3);
            }
        }
    }

    #[test]
    fn test_every_point_is_on_screen_for_small_and_odd_screens() {
        let planner = planner();
        let mut rng = StdRng::seed_from_u64(4);
        let screens = [
            ScreenBounds::new(1, 1),
            ScreenBounds::new(3, 500),
            ScreenBounds::new(19, 21),
            ScreenBounds::new(800, 600),
            ScreenBounds::new(5120, 1440),
        ];

        for bounds in screens {
            for _ in 0..200 {
                let start = Point::new(rng.gen_range(0..bounds.width), rng.gen_range(0..bounds.height));
                let plan = planner.plan(&mut rng, start, bounds);
                for p in plan {
                    assert!(bounds.contains(p.point), "{} escaped {bounds}", p.point);
                }
            }
        }
    }

    #[test]
    fn test_step_delays_stay_within_base_plus_hesitation() {
        let planner = planner();
        let bounds = ScreenBounds::new(800, 600);
        let mut rng = StdRng::seed_from_u64(5);
        let mut hesitations = 0;

        for _ in 0..200 {
            for p in planner.plan(&mut rng, Point::new(400, 300), bounds) {
                let ms = p.delay.as_millis() as u64;
                if p.hesitated {
                    hesitations += 1;
                    assert!((47..=186).contains(&ms), "hesitation delay {ms}ms");
                } else {
                    assert!((7..=26).contains(&ms), "step delay {ms}ms");
                }
            }
        }

        assert!(hesitations > 0, "hesitation must occur occasionally");
    }

    #[test]
    fn test_same_seed_gives_same_path() {
        let planner = planner();
        let bounds = ScreenBounds::new(800, 600);
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);

        let path_a: Vec<PathPoint> = planner.plan(&mut a, Point::new(400, 300), bounds).collect();
        let path_b: Vec<PathPoint> = planner.plan(&mut b, Point::new(400, 300), bounds).collect();

        assert_eq!(path_a, path_b);
    }

    #[test]
    fn test_path_is_not_a_straight_line() {
        // Wobble plus jitter must bend at least one long path.
        let planner = planner();
        let bounds = ScreenBounds::new(1920, 1080);
        let mut rng = StdRng::seed_from_u64(6);
        let mut bent = false;

        for _ in 0..50 {
            let from = Point::new(960, 540);
            let mut plan = planner.plan(&mut rng, from, bounds);
            let target = plan.target();
            let steps = plan.steps() as usize;
            let dx = f64::from(target.x - from.x);
            let dy = f64::from(target.y - from.y);
            let len = (dx * dx + dy * dy).sqrt();
            if len < 1.0 {
                continue;
            }
            for p in plan.by_ref().take(steps) {
                let px = f64::from(p.point.x - from.x);
                let py = f64::from(p.point.y - from.y);
                let distance = (px * dy - py * dx).abs() / len;
                if distance > 1.5 {
                    bent = true;
                }
            }
        }

        assert!(bent);
    }

    #[test]
    fn test_step_delay_without_hesitation_uses_base_span() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let (delay, hesitated) =
                step_delay(&mut rng, Span::new(10, 10), 0.0, Span::new(500, 500));
            assert_eq!(delay, Duration::from_millis(10));
            assert!(!hesitated);
        }
    }
}
