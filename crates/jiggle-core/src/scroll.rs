//! Scroll-burst planning.
//!
//! A cycle scrolls with a fixed probability.  When it does, it performs a
//! few short bursts of single-line ticks.  The first burst picks a direction
//! by coin flip; each later burst may reverse it, which reads like someone
//! skimming down a page and back up.

use rand::Rng;

use crate::random::chance;
use crate::tuning::ScrollTuning;

/// Vertical scroll direction; one tick moves one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Signed line count for a single tick: `+1` up, `-1` down.
    pub fn lines(self) -> i32 {
        match self {
            ScrollDirection::Up => 1,
            ScrollDirection::Down => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            ScrollDirection::Up => ScrollDirection::Down,
            ScrollDirection::Down => ScrollDirection::Up,
        }
    }
}

impl std::fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
        })
    }
}

/// One burst: `ticks` consecutive one-line scrolls in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBurst {
    pub direction: ScrollDirection,
    pub ticks: u32,
}

impl ScrollBurst {
    pub const fn new(direction: ScrollDirection, ticks: u32) -> Self {
        Self { direction, ticks }
    }
}

/// Decides whether this cycle scrolls and, if so, lays out its bursts.
///
/// Returns an empty list when the cycle does not scroll.
pub fn plan_scroll<R: Rng + ?Sized>(rng: &mut R, tuning: &ScrollTuning) -> Vec<ScrollBurst> {
    if !chance(rng, tuning.probability) {
        return Vec::new();
    }

    let count = tuning.bursts.sample(rng);
    let mut direction = if rng.gen_bool(0.5) {
        ScrollDirection::Up
    } else {
        ScrollDirection::Down
    };

    let mut bursts = Vec::with_capacity(count as usize);
    for i in 0..count {
        if i > 0 && chance(rng, tuning.reverse_probability) {
            direction = direction.reversed();
        }
        bursts.push(ScrollBurst::new(direction, tuning.ticks.sample(rng)));
    }
    bursts
}

// ── Tests ─────────────────────────────────────────────────────────────────────
