//! Dry-run driver: describes each action instead of performing it.
//!
//! Moves and scrolls are written as one line each to the configured writer
//! (stdout by default):
//!
//! ```text
//! dry-run move: (412,305)
//! dry-run scroll: down
//! ```
//!
//! The driver keeps its own simulated cursor, starting wherever the caller
//! says (normally the real cursor position, read once at startup), so the
//! planner sees a consistent position from one cycle to the next.

use std::io::Write;
use std::sync::Mutex;

use jiggle_core::{Point, ScreenBounds, ScrollDirection};

use crate::application::cursor::{CursorDriver, PlatformError};

pub struct DryRunDriver {
    out: Mutex<Box<dyn Write + Send>>,
    position: Mutex<Point>,
    bounds: ScreenBounds,
}

impl DryRunDriver {
    /// A dry-run driver printing to stdout.
    pub fn new(start: Point, bounds: ScreenBounds) -> Self {
        Self::with_writer(start, bounds, Box::new(std::io::stdout()))
    }

    pub fn with_writer(start: Point, bounds: ScreenBounds, out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            position: Mutex::new(bounds.clamp(start)),
            bounds,
        }
    }

    fn emit(
        &self,
        operation: &'static str,
        line: std::fmt::Arguments<'_>,
    ) -> Result<(), PlatformError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| PlatformError::failure(operation, "output lock poisoned"))?;
        writeln!(out, "{line}")
            .and_then(|()| out.flush())
            .map_err(|e| PlatformError::failure(operation, e.to_string()))
    }
}

impl CursorDriver for DryRunDriver {
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        let point = Point::new(x, y);
        self.emit("move_cursor_to", format_args!("dry-run move: {point}"))?;
        if let Ok(mut position) = self.position.lock() {
            *position = point;
        }
        Ok(())
    }

    fn scroll_vertical(&self, lines: i32) -> Result<(), PlatformError> {
        let direction = if lines >= 0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        self.emit("scroll_vertical", format_args!("dry-run scroll: {direction}"))
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        self.position
            .lock()
            .map(|p| *p)
            .map_err(|_| PlatformError::failure("cursor_position", "position lock poisoned"))
    }

    fn screen_size(&self) -> Result<ScreenBounds, PlatformError> {
        Ok(self.bounds)
    }
}
