//! Screen-space geometry: points, bounds, and clamping.
//!
//! Coordinates follow the top-left origin convention used by Windows, X11 and
//! the CoreGraphics global display space: `x` grows to the right, `y` grows
//! downward, and the visible pixels of a `width × height` screen are
//! `[0, width-1] × [0, height-1]`.

use serde::{Deserialize, Serialize};

/// An integer position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`, saturating at the `i32` limits.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Size of the primary display in pixels.
///
/// Re-queried every cycle; resolution changes and display hot-plugging mean
/// a cached value can go stale between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the centre pixel of the screen.
    pub fn center(&self) -> Point {
        Point::new(self.width.max(1) / 2, self.height.max(1) / 2)
    }

    /// Returns `true` if `p` is a visible pixel, i.e. inside `[0, w-1] × [0, h-1]`.
    pub fn contains(&self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Clamps `p` onto the full screen, `[0, w-1] × [0, h-1]`.
    ///
    /// Degenerate bounds (zero or negative size) collapse to the origin.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            clamp(p.x, 0, (self.width - 1).max(0)),
            clamp(p.y, 0, (self.height - 1).max(0)),
        )
    }

    /// Clamps `p` into the inset rectangle `[margin, dim-margin]` on both axes.
    ///
    /// When the screen is narrower than twice the margin the inset collapses
    /// to `margin`; the result is then pulled back onto the full screen so it
    /// never names an invisible pixel.
    pub fn clamp_inset(&self, p: Point, margin: i32) -> Point {
        let inset = Point::new(
            clamp(p.x, margin, margin.max(self.width - margin)),
            clamp(p.y, margin, margin.max(self.height - margin)),
        );
        self.clamp(inset)
    }
}

impl std::fmt::Display for ScreenBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Clamps `v` into `[lo, hi]`.  Unlike [`i32::clamp`] this never panics when
/// `lo > hi`; the lower bound wins.
pub fn clamp(v: i32, lo: i32, hi: i32) -> i32 {
    if v > hi {
        hi.max(lo)
    } else if v < lo {
        lo
    } else {
        v
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
