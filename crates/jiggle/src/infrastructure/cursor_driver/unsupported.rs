//! Fallback driver for builds without a native cursor backend.
//!
//! Every primitive fails with [`PlatformError::Unsupported`], so a run on
//! such a build stops on its first cycle with a clear message instead of
//! silently doing nothing.

use jiggle_core::{Point, ScreenBounds};

use crate::application::cursor::{CursorDriver, PlatformError};

pub struct UnsupportedDriver {
    platform: &'static str,
    detail: String,
}

impl UnsupportedDriver {
    pub fn new(platform: &'static str, detail: impl Into<String>) -> Self {
        Self {
            platform,
            detail: detail.into(),
        }
    }

    fn error(&self, operation: &'static str) -> PlatformError {
        PlatformError::Unsupported {
            operation,
            platform: self.platform,
            detail: self.detail.clone(),
        }
    }
}

impl CursorDriver for UnsupportedDriver {
    fn move_cursor_to(&self, _x: i32, _y: i32) -> Result<(), PlatformError> {
        Err(self.error("move_cursor_to"))
    }

    fn scroll_vertical(&self, _lines: i32) -> Result<(), PlatformError> {
        Err(self.error("scroll_vertical"))
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        Err(self.error("cursor_position"))
    }

    fn screen_size(&self) -> Result<ScreenBounds, PlatformError> {
        Err(self.error("screen_size"))
    }
}
