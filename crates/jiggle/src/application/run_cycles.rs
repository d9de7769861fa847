//! CycleScheduler: the anti-idle loop.
//!
//! # What one cycle does
//!
//! 1. Reads the cursor position and the screen size.  Both are re-read every
//!    cycle because the user (or a display change) may have moved things.
//! 2. Asks the [`MotionPlanner`] for a path and walks it: one
//!    [`CursorDriver::move_cursor_to`] call per point, then an interruptible
//!    wait of that point's delay.
//! 3. Maybe scrolls: a few bursts of one-line ticks with short gaps between
//!    ticks and longer gaps between bursts.
//! 4. Pauses: a tiered random duration, or the fixed interval when one was
//!    configured.
//!
//! # When the loop ends
//!
//! | Condition                          | Checked               | Result                      |
//! |------------------------------------|-----------------------|-----------------------------|
//! | Stop signal raised                 | during every wait     | `Ok(StopReason::Signal)`    |
//! | Deadline passed                    | before each new cycle | `Ok(StopReason::DeadlineReached)` |
//! | A cursor primitive returned error  | after every call      | `Err(PlatformError)`        |
//!
//! The deadline never preempts a cycle that has already started; only the
//! stop signal does.  A failed primitive aborts immediately without retrying
//! and without undoing moves that already happened.

use std::sync::Arc;
use std::time::Duration;

use jiggle_core::{
    plan_scroll, sample_pause, MotionPlanner, PathSegment, PauseTuning, Point, ScreenBounds,
    ScrollBurst, ScrollTuning, Tuning,
};
use rand::Rng;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::application::cursor::{CursorDriver, PlatformError};
use crate::application::stop::{sleep_or_stop, SleepOutcome, StopSignal};

/// Optional absolute time after which no new cycle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No deadline: run until stopped.
    pub const fn none() -> Self {
        Deadline(None)
    }

    /// A deadline `duration` from now.  A duration too large to represent
    /// means no deadline.
    pub fn after(duration: Duration) -> Self {
        Deadline(Instant::now().checked_add(duration))
    }

    /// A deadline `minutes` from now; `0` means no deadline.
    pub fn from_minutes(minutes: u64) -> Self {
        if minutes == 0 {
            Self::none()
        } else {
            Self::after(Duration::from_secs(minutes.saturating_mul(60)))
        }
    }

    pub fn instant(&self) -> Option<Instant> {
        self.0
    }

    /// Returns `true` once `now` is strictly past the deadline.
    pub fn has_passed(&self, now: Instant) -> bool {
        self.0.is_some_and(|end| now > end)
    }
}

/// How a single cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    /// The stop signal fired during one of the cycle's waits.
    Interrupted,
    Failed(PlatformError),
}

/// Why a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DeadlineReached,
    Signal,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StopReason::DeadlineReached => "configured duration reached",
            StopReason::Signal => "stopped by signal",
        })
    }
}

/// Drives move / scroll / pause cycles until the deadline, a stop request,
/// or a platform failure.
///
/// Owns the run's only random generator; every decision in the run draws
/// from it in a fixed order, so a fixed seed reproduces the run.
pub struct CycleScheduler<R> {
    driver: Arc<dyn CursorDriver>,
    planner: MotionPlanner,
    scroll: ScrollTuning,
    pause: PauseTuning,
    fixed_pause: Option<Duration>,
    deadline: Deadline,
    stop: StopSignal,
    rng: R,
    cycles: u64,
}

impl<R: Rng> CycleScheduler<R> {
    /// Creates a scheduler with no deadline and tiered pauses.
    ///
    /// `tuning` is expected to have passed [`Tuning::validate`].
    pub fn new(driver: Arc<dyn CursorDriver>, tuning: Tuning, rng: R, stop: StopSignal) -> Self {
        Self {
            driver,
            planner: MotionPlanner::new(tuning.motion),
            scroll: tuning.scroll,
            pause: tuning.pause,
            fixed_pause: None,
            deadline: Deadline::none(),
            stop,
            rng,
            cycles: 0,
        }
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Replaces the tiered pause distribution with a fixed pause.
    pub fn with_fixed_pause(mut self, pause: Option<Duration>) -> Self {
        self.fixed_pause = pause;
        self
    }

    /// Number of cycles that ran to completion.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    /// Runs cycles until the deadline passes or the stop signal is raised.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlatformError`] from any cursor primitive.
    pub async fn run(&mut self) -> Result<StopReason, PlatformError> {
        loop {
            if self.stop.is_raised() {
                info!(cycles = self.cycles, "stopped by signal");
                return Ok(StopReason::Signal);
            }
            if self.deadline.has_passed(Instant::now()) {
                info!(cycles = self.cycles, "configured duration reached");
                return Ok(StopReason::DeadlineReached);
            }

            match self.run_cycle().await {
                CycleOutcome::Completed => {}
                CycleOutcome::Interrupted => {
                    info!(cycles = self.cycles, "stopped by signal");
                    return Ok(StopReason::Signal);
                }
                CycleOutcome::Failed(e) => return Err(e),
            }
        }
    }

    /// Runs exactly one cycle: move, maybe scroll, pause.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let cycle = self.cycles + 1;
        debug!(cycle, "cycle started");
        match self.cycle_steps().await {
            Ok(SleepOutcome::Completed) => {
                self.cycles = cycle;
                debug!(cycle, "cycle completed");
                CycleOutcome::Completed
            }
            Ok(SleepOutcome::Interrupted) => CycleOutcome::Interrupted,
            Err(e) => CycleOutcome::Failed(e),
        }
    }

    async fn cycle_steps(&mut self) -> Result<SleepOutcome, PlatformError> {
        let from = self.driver.cursor_position()?;
        let bounds = self.driver.screen_size()?;

        if self.walk_path(from, bounds).await? == SleepOutcome::Interrupted {
            return Ok(SleepOutcome::Interrupted);
        }

        let bursts = plan_scroll(&mut self.rng, &self.scroll);
        if self.scroll_bursts(&bursts).await? == SleepOutcome::Interrupted {
            return Ok(SleepOutcome::Interrupted);
        }

        let pause = match self.fixed_pause {
            Some(pause) => pause,
            None => sample_pause(&mut self.rng, &self.pause),
        };
        debug!(pause_ms = pause.as_millis() as u64, "pausing");
        Ok(sleep_or_stop(pause, &self.stop).await)
    }

    async fn walk_path(
        &mut self,
        from: Point,
        bounds: ScreenBounds,
    ) -> Result<SleepOutcome, PlatformError> {
        let plan = self.planner.plan(&mut self.rng, from, bounds);
        debug!(
            %from,
            target = %plan.target(),
            %bounds,
            steps = plan.steps(),
            corrections = plan.corrections(),
            "moving"
        );

        for step in plan {
            self.driver.move_cursor_to(step.point.x, step.point.y)?;
            if step.hesitated {
                debug!(delay_ms = step.delay.as_millis() as u64, "hesitating");
            }
            if step.segment == PathSegment::Correction {
                debug!(point = %step.point, "micro-correction");
            }
            if sleep_or_stop(step.delay, &self.stop).await == SleepOutcome::Interrupted {
                return Ok(SleepOutcome::Interrupted);
            }
        }
        Ok(SleepOutcome::Completed)
    }

    /// Performs `bursts`: one scroll call per tick, a tick gap between ticks
    /// of the same burst, and a burst gap between consecutive bursts.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlatformError`] from the scroll primitive.
    pub async fn scroll_bursts(
        &mut self,
        bursts: &[ScrollBurst],
    ) -> Result<SleepOutcome, PlatformError> {
        for (index, burst) in bursts.iter().enumerate() {
            debug!(
                burst = index + 1,
                of = bursts.len(),
                direction = %burst.direction,
                ticks = burst.ticks,
                "scrolling"
            );
            for tick in 0..burst.ticks {
                self.driver.scroll_vertical(burst.direction.lines())?;
                if tick + 1 < burst.ticks {
                    let gap = Duration::from_millis(self.scroll.tick_gap_ms.sample(&mut self.rng));
                    if sleep_or_stop(gap, &self.stop).await == SleepOutcome::Interrupted {
                        return Ok(SleepOutcome::Interrupted);
                    }
                }
            }
            if index + 1 < bursts.len() {
                let gap = Duration::from_millis(self.scroll.burst_gap_ms.sample(&mut self.rng));
                if sleep_or_stop(gap, &self.stop).await == SleepOutcome::Interrupted {
                    return Ok(SleepOutcome::Interrupted);
                }
            }
        }
        Ok(SleepOutcome::Completed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
