//! Tuned constants for motion, scrolling and pausing.
//!
//! None of these numbers is a correctness property; they only shape how
//! "human" the output looks.  They are grouped here so a TOML file can
//! override any subset of them.  Every struct is `#[serde(default)]`, so a
//! file that names a single field leaves the rest at their built-in values:
//!
//! ```toml
//! [motion]
//! margin = 24
//!
//! [scroll]
//! probability = 0.3
//! ```
//!
//! Call [`Tuning::validate`] after deserializing; the samplers assume every
//! span is ordered and every probability lies in `[0, 1]`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::{Span, Weighted};

/// Error returned by [`Tuning::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    /// A span has `min > max`.
    #[error("{field}: min must not exceed max")]
    InvalidSpan { field: &'static str },

    /// A probability lies outside `[0, 1]`.
    #[error("{field}: probability {value} is outside [0, 1]")]
    InvalidProbability { field: &'static str, value: f64 },

    /// A tier list is empty or all of its weights are zero.
    #[error("{field}: at least one tier with a positive weight is required")]
    NoUsableTier { field: &'static str },

    /// A tier weight is negative or not finite.
    #[error("{field}: tier weight {value} must be a finite, non-negative number")]
    InvalidWeight { field: &'static str, value: f64 },

    /// A distance reach has a negative magnitude.
    #[error("{field}: reach magnitudes must be non-negative")]
    InvalidReach { field: &'static str },

    /// The target margin is negative.
    #[error("motion.margin must be non-negative (got {0})")]
    NegativeMargin(i32),

    /// A real-valued span has an infinite bound or an infinite width.
    #[error("{field}: bounds and their difference must be finite")]
    NonFinite { field: &'static str },

    /// The step-count span allows a path with zero steps.
    #[error("motion.steps.min must be at least 1")]
    ZeroSteps,
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// All tuned constants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub motion: MotionTuning,
    pub scroll: ScrollTuning,
    pub pause: PauseTuning,
}

/// Per-axis reach of a distance tier.
///
/// The magnitude of a move along one axis is drawn from
/// `[min_abs, max_abs(dim))` where
/// `max_abs(dim) = min(cap, max(floor, dim / screen_divisor))`.
/// A `screen_divisor` of 0 disables screen scaling and uses `cap` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisReach {
    pub min_abs: i32,
    pub cap: i32,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub screen_divisor: i32,
}

impl AxisReach {
    /// A reach that ignores the screen size.
    pub const fn fixed(min_abs: i32, cap: i32) -> Self {
        Self {
            min_abs,
            cap,
            floor: 0,
            screen_divisor: 0,
        }
    }

    /// A reach whose upper bound follows `dim / screen_divisor`, kept inside
    /// `[floor, cap]`.
    pub const fn scaled(min_abs: i32, cap: i32, floor: i32, screen_divisor: i32) -> Self {
        Self {
            min_abs,
            cap,
            floor,
            screen_divisor,
        }
    }

    /// Upper (exclusive) magnitude for a screen dimension of `dim` pixels.
    pub fn max_abs(&self, dim: i32) -> i32 {
        if self.screen_divisor <= 0 {
            self.cap
        } else {
            self.cap.min(self.floor.max(dim / self.screen_divisor))
        }
    }
}

/// One tier of the target-distance distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTier {
    pub weight: f64,
    pub x: AxisReach,
    pub y: AxisReach,
}

impl Weighted for DistanceTier {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Motion Planner constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Targets are kept at least this many pixels away from every edge.
    pub margin: i32,
    pub tiers: Vec<DistanceTier>,
    /// Number of main-path steps per movement.
    pub steps: Span<u32>,
    /// Per-axis integer noise added to every main-path step except the last.
    pub jitter: Span<i32>,
    /// Peak wobble displacement in pixels, drawn once per axis per movement.
    pub wobble_amplitude: Span<f64>,
    /// Wobble cycles over the whole path.
    pub wobble_frequency: Span<f64>,
    pub step_delay_ms: Span<u64>,
    pub hesitation_probability: f64,
    pub hesitation_ms: Span<u64>,
    pub micro_corrections: Span<u32>,
    pub correction_offset: Span<i32>,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            margin: 10,
            tiers: vec![
                DistanceTier {
                    weight: 0.67,
                    x: AxisReach::fixed(10, 120),
                    y: AxisReach::fixed(8, 80),
                },
                DistanceTier {
                    weight: 0.25,
                    x: AxisReach::scaled(120, 360, 130, 3),
                    y: AxisReach::scaled(80, 240, 90, 3),
                },
                DistanceTier {
                    weight: 0.08,
                    x: AxisReach::scaled(240, 800, 260, 2),
                    y: AxisReach::scaled(120, 500, 130, 2),
                },
            ],
            steps: Span::new(18, 65),
            jitter: Span::new(-2, 2),
            wobble_amplitude: Span::new(0.8, 3.5),
            wobble_frequency: Span::new(0.6, 2.2),
            step_delay_ms: Span::new(7, 26),
            hesitation_probability: 0.04,
            hesitation_ms: Span::new(40, 160),
            micro_corrections: Span::new(0, 2),
            correction_offset: Span::new(-3, 3),
        }
    }
}

/// Scroll-burst constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Probability that a cycle scrolls at all.
    pub probability: f64,
    pub bursts: Span<u32>,
    pub ticks: Span<u32>,
    /// Probability that a burst after the first reverses direction.
    pub reverse_probability: f64,
    pub tick_gap_ms: Span<u64>,
    pub burst_gap_ms: Span<u64>,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            probability: 0.58,
            bursts: Span::new(1, 3),
            ticks: Span::new(1, 4),
            reverse_probability: 0.5,
            tick_gap_ms: Span::new(45, 235),
            burst_gap_ms: Span::new(250, 1550),
        }
    }
}

/// One tier of the inter-cycle pause distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseTier {
    pub weight: f64,
    pub ms: Span<u64>,
}

impl Weighted for PauseTier {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Inter-cycle pause constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseTuning {
    pub tiers: Vec<PauseTier>,
}

impl Default for PauseTuning {
    fn default() -> Self {
        Self {
            tiers: vec![
                PauseTier {
                    weight: 0.62,
                    ms: Span::new(900, 4_700),
                },
                PauseTier {
                    weight: 0.26,
                    ms: Span::new(4_000, 13_000),
                },
                PauseTier {
                    weight: 0.12,
                    ms: Span::new(12_000, 34_000),
                },
            ],
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

impl Tuning {
    /// Checks every span, probability and tier list.
    ///
    /// # Errors
    ///
    /// Returns the first [`TuningError`] found.
    pub fn validate(&self) -> Result<(), TuningError> {
        self.motion.validate()?;
        self.scroll.validate()?;
        self.pause.validate()
    }
}

impl MotionTuning {
    fn validate(&self) -> Result<(), TuningError> {
        if self.margin < 0 {
            return Err(TuningError::NegativeMargin(self.margin));
        }
        check_tiers("motion.tiers", self.tiers.iter().map(|t| t.weight))?;
        for tier in &self.tiers {
            for reach in [tier.x, tier.y] {
                if reach.min_abs < 0 || reach.cap < 0 || reach.floor < 0 {
                    return Err(TuningError::InvalidReach {
                        field: "motion.tiers",
                    });
                }
            }
        }
        check_span("motion.steps", &self.steps)?;
        if self.steps.min == 0 {
            return Err(TuningError::ZeroSteps);
        }
        check_span("motion.jitter", &self.jitter)?;
        check_finite_span("motion.wobble_amplitude", &self.wobble_amplitude)?;
        check_finite_span("motion.wobble_frequency", &self.wobble_frequency)?;
        check_span("motion.step_delay_ms", &self.step_delay_ms)?;
        check_probability("motion.hesitation_probability", self.hesitation_probability)?;
        check_span("motion.hesitation_ms", &self.hesitation_ms)?;
        check_span("motion.micro_corrections", &self.micro_corrections)?;
        check_span("motion.correction_offset", &self.correction_offset)
    }
}

impl ScrollTuning {
    fn validate(&self) -> Result<(), TuningError> {
        check_probability("scroll.probability", self.probability)?;
        check_probability("scroll.reverse_probability", self.reverse_probability)?;
        check_span("scroll.bursts", &self.bursts)?;
        check_span("scroll.ticks", &self.ticks)?;
        check_span("scroll.tick_gap_ms", &self.tick_gap_ms)?;
        check_span("scroll.burst_gap_ms", &self.burst_gap_ms)
    }
}

impl PauseTuning {
    fn validate(&self) -> Result<(), TuningError> {
        check_tiers("pause.tiers", self.tiers.iter().map(|t| t.weight))?;
        for tier in &self.tiers {
            check_span("pause.tiers.ms", &tier.ms)?;
        }
        Ok(())
    }
}

fn check_span<T: PartialOrd>(field: &'static str, span: &Span<T>) -> Result<(), TuningError> {
    if span.is_valid() {
        Ok(())
    } else {
        Err(TuningError::InvalidSpan { field })
    }
}

/// Uniform sampling over `f64` needs finite bounds and a finite width.
fn check_finite_span(field: &'static str, span: &Span<f64>) -> Result<(), TuningError> {
    check_span(field, span)?;
    if span.min.is_finite() && span.max.is_finite() && (span.max - span.min).is_finite() {
        Ok(())
    } else {
        Err(TuningError::NonFinite { field })
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::InvalidProbability { field, value })
    }
}

fn check_tiers(
    field: &'static str,
    weights: impl Iterator<Item = f64>,
) -> Result<(), TuningError> {
    let mut total = 0.0;
    for value in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(TuningError::InvalidWeight { field, value });
        }
        total += value;
    }
    if total > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NoUsableTier { field })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
