//! Recording cursor driver for tests.
//!
//! Every call is pushed into a `Mutex<Vec<...>>` together with the (tokio)
//! instant it happened at, so tests can assert on order, count and timing.
//! The driver keeps a simulated cursor: `cursor_position` reports wherever
//! the last successful move put it.
//!
//! # Failure injection
//!
//! - `should_fail` makes every primitive fail.
//! - `fail_on_move = Some(n)` makes the `n`-th move (1-based) fail; the
//!   earlier moves are recorded normally.

use std::sync::Mutex;

use jiggle_core::{Point, ScreenBounds};
use tokio::time::Instant;

use crate::application::cursor::{CursorDriver, PlatformError};

/// A driver that records calls instead of performing them.
pub struct RecordingCursorDriver {
    /// Each successful move target, with the instant it was issued.
    pub moves: Mutex<Vec<(Point, Instant)>>,
    /// Each successful scroll call's `lines`, with the instant it was issued.
    pub scrolls: Mutex<Vec<(i32, Instant)>>,
    /// Instants of every `cursor_position` call.
    pub position_queries: Mutex<Vec<Instant>>,
    /// Number of move attempts, including failed ones.
    move_attempts: Mutex<usize>,
    position: Mutex<Point>,
    bounds: ScreenBounds,
    pub fail_on_move: Option<usize>,
    pub should_fail: bool,
}

impl RecordingCursorDriver {
    pub fn new(start: Point, bounds: ScreenBounds) -> Self {
        Self {
            moves: Mutex::new(Vec::new()),
            scrolls: Mutex::new(Vec::new()),
            position_queries: Mutex::new(Vec::new()),
            move_attempts: Mutex::new(0),
            position: Mutex::new(start),
            bounds,
            fail_on_move: None,
            should_fail: false,
        }
    }

    /// A 1920x1080 screen with the cursor in the middle.
    pub fn single_1080p() -> Self {
        let bounds = ScreenBounds::new(1920, 1080);
        Self::new(bounds.center(), bounds)
    }

    pub fn move_count(&self) -> usize {
        self.moves.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn position_query_count(&self) -> usize {
        self.position_queries.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Recorded move targets, without timestamps.
    pub fn move_points(&self) -> Vec<Point> {
        self.moves
            .lock()
            .map(|m| m.iter().map(|(p, _)| *p).collect())
            .unwrap_or_default()
    }

    fn mock_failure(operation: &'static str) -> PlatformError {
        PlatformError::failure(operation, "mock failure")
    }
}

impl Default for RecordingCursorDriver {
    fn default() -> Self {
        Self::single_1080p()
    }
}

impl CursorDriver for RecordingCursorDriver {
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        if self.should_fail {
            return Err(Self::mock_failure("move_cursor_to"));
        }
        let attempt = {
            let mut attempts = self
                .move_attempts
                .lock()
                .map_err(|_| Self::mock_failure("move_cursor_to"))?;
            *attempts += 1;
            *attempts
        };
        if self.fail_on_move == Some(attempt) {
            return Err(Self::mock_failure("move_cursor_to"));
        }

        let point = Point::new(x, y);
        if let Ok(mut position) = self.position.lock() {
            *position = point;
        }
        if let Ok(mut moves) = self.moves.lock() {
            moves.push((point, Instant::now()));
        }
        Ok(())
    }

    fn scroll_vertical(&self, lines: i32) -> Result<(), PlatformError> {
        if self.should_fail {
            return Err(Self::mock_failure("scroll_vertical"));
        }
        if let Ok(mut scrolls) = self.scrolls.lock() {
            scrolls.push((lines, Instant::now()));
        }
        Ok(())
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        if self.should_fail {
            return Err(Self::mock_failure("cursor_position"));
        }
        if let Ok(mut queries) = self.position_queries.lock() {
            queries.push(Instant::now());
        }
        self.position
            .lock()
            .map(|p| *p)
            .map_err(|_| Self::mock_failure("cursor_position"))
    }

    fn screen_size(&self) -> Result<ScreenBounds, PlatformError> {
        if self.should_fail {
            return Err(Self::mock_failure("screen_size"));
        }
        Ok(self.bounds)
    }
}
