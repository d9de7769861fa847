//! The cursor capability the scheduler drives.
//!
//! The scheduler only ever needs four primitives: move, scroll, read the
//! cursor position, read the screen size.  Each supported OS provides an
//! implementation in the infrastructure layer; the dry-run and mock drivers
//! implement the same trait without touching the real cursor.

use jiggle_core::{Point, ScreenBounds};
use thiserror::Error;

/// Error type for cursor primitives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The primitive has no implementation on this platform or build.
    #[error("{operation} is not supported on {platform}: {detail}")]
    Unsupported {
        operation: &'static str,
        platform: &'static str,
        detail: String,
    },

    /// The underlying OS call failed.
    #[error("{operation} failed: {detail}")]
    Failure {
        operation: &'static str,
        detail: String,
    },
}

impl PlatformError {
    pub fn failure(operation: &'static str, detail: impl Into<String>) -> Self {
        PlatformError::Failure {
            operation,
            detail: detail.into(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, PlatformError::Unsupported { .. })
    }
}

/// Platform-agnostic cursor control.
///
/// Calls are expected to return promptly; the scheduler does not wrap them in
/// timeouts.
#[cfg_attr(test, mockall::automock)]
pub trait CursorDriver: Send + Sync {
    /// Moves the cursor to an absolute screen position.
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), PlatformError>;

    /// Scrolls vertically by `lines` wheel notches; positive scrolls up.
    fn scroll_vertical(&self, lines: i32) -> Result<(), PlatformError>;

    /// Returns the current cursor position.
    fn cursor_position(&self) -> Result<Point, PlatformError>;

    /// Returns the size of the primary display.
    fn screen_size(&self) -> Result<ScreenBounds, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_names_the_operation() {
        let e = PlatformError::failure("SetCursorPos", "access denied");
        assert_eq!(e.to_string(), "SetCursorPos failed: access denied");
        assert!(!e.is_unsupported());
    }

    #[test]
    fn test_unsupported_display_names_platform() {
        let e = PlatformError::Unsupported {
            operation: "move_cursor_to",
            platform: "freebsd",
            detail: "no cursor backend".into(),
        };
        assert!(e.is_unsupported());
        assert!(e.to_string().contains("freebsd"));
    }
}
