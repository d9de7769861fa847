//! # jiggle-core
//!
//! Pure motion and timing synthesis for the jiggle anti-idle tool.
//!
//! This crate has zero dependencies on OS APIs or async runtimes.  Everything
//! it produces is a value (a point, a duration, a list of scroll bursts) that
//! the `jiggle` application crate turns into real cursor calls and sleeps.
//!
//! # Architecture overview
//!
//! - **`domain`** – Screen geometry: [`Point`], [`ScreenBounds`], clamping.
//!
//! - **`random`** – Shared randomized-distribution helpers: inclusive spans,
//!   signed-magnitude draws, weighted tier picking.  Every randomized decision
//!   in a run goes through a single caller-owned generator, so a fixed seed
//!   reproduces the whole run.
//!
//! - **`motion`** – The Motion Planner.  Picks a target near the current
//!   cursor and yields an eased, wobbled, jittered path toward it, followed by
//!   a few micro-correction points.  The path is a lazy iterator: one point is
//!   computed per `next()` call.
//!
//! - **`scroll`** / **`pause`** – Scroll-burst planning and the three-tier
//!   inter-cycle pause distribution.
//!
//! - **`tuning`** – All tuned constants in one serde-deserializable struct.

pub mod domain;
pub mod motion;
pub mod pause;
pub mod random;
pub mod scroll;
pub mod tuning;

pub use domain::geometry::{Point, ScreenBounds};
pub use motion::easing::ease_in_out;
pub use motion::planner::{MotionPlan, MotionPlanner, PathPoint, PathSegment};
pub use pause::sample_pause;
pub use random::Span;
pub use scroll::{plan_scroll, ScrollBurst, ScrollDirection};
pub use tuning::{MotionTuning, PauseTuning, ScrollTuning, Tuning, TuningError};
