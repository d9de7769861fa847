//! Linux X11 cursor driver via Xlib and the XTest extension.
//!
//! | Primitive         | X11 call                                           |
//! |-------------------|----------------------------------------------------|
//! | `move_cursor_to`  | `XTestFakeMotionEvent(display, -1, x, y, 0)`       |
//! | `scroll_vertical` | `XTestFakeButtonEvent` press+release, button 4 / 5 |
//! | `cursor_position` | `XQueryPointer` on the default root window         |
//! | `screen_size`     | `XDisplayWidth` / `XDisplayHeight` of the default screen |
//!
//! X11 has no scroll API: each wheel notch is a press+release of button 4
//! (up) or 5 (down).  Every injected event is followed by `XFlush` so it
//! reaches the server immediately instead of waiting in Xlib's queue.
//!
//! # Permissions
//!
//! The process needs access to the display named by `DISPLAY`.  Wayland
//! sessions generally refuse synthetic input from X clients even through
//! XWayland.

#![cfg(all(target_os = "linux", feature = "x11"))]

use std::os::raw::{c_int, c_uint};
use std::sync::Mutex;

use jiggle_core::{Point, ScreenBounds};
use x11::{xlib, xtest};

use crate::application::cursor::{CursorDriver, PlatformError};

// ── X11 constants ─────────────────────────────────────────────────────────────

/// `CurrentTime`: let the server timestamp synthetic events.
const CURRENT_TIME: xlib::Time = 0;

/// Screen argument to `XTestFakeMotionEvent` meaning "the pointer's screen".
const SCREEN_DEFAULT: c_int = -1;

const BUTTON_SCROLL_UP: c_uint = 4;
const BUTTON_SCROLL_DOWN: c_uint = 5;

/// Owned Xlib connection.
struct Connection(*mut xlib::Display);

// SAFETY: the pointer is only dereferenced by Xlib calls made while holding
// the driver's mutex, so it is never used from two threads at once.
unsafe impl Send for Connection {}

impl Drop for Connection {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a successful XOpenDisplay and is not
        // used after this.
        unsafe { xlib::XCloseDisplay(self.0) };
    }
}

pub struct LinuxXTestDriver {
    display: Mutex<Connection>,
}

impl LinuxXTestDriver {
    /// Opens the display named by `DISPLAY` and checks for XTest.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Failure`] if the display cannot be opened or
    /// the server lacks the XTest extension.
    pub fn new() -> Result<Self, PlatformError> {
        // SAFETY: a null name makes Xlib use $DISPLAY.
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            let name = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(PlatformError::failure(
                "XOpenDisplay",
                format!("cannot open display; DISPLAY={name}"),
            ));
        }
        let connection = Connection(display);

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: `display` is valid and all out-pointers are live locals.
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(
                connection.0,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if has_xtest == 0 {
            return Err(PlatformError::failure(
                "XTestQueryExtension",
                "X server does not provide the XTest extension",
            ));
        }

        Ok(Self {
            display: Mutex::new(connection),
        })
    }

    fn with_display<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(*mut xlib::Display) -> Result<T, PlatformError>,
    ) -> Result<T, PlatformError> {
        let connection = self
            .display
            .lock()
            .map_err(|_| PlatformError::failure(operation, "display lock poisoned"))?;
        f(connection.0)
    }
}

impl CursorDriver for LinuxXTestDriver {
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        self.with_display("XTestFakeMotionEvent", |d| {
            // SAFETY: `d` is a live display guarded by the mutex.
            let ok = unsafe {
                let ok = xtest::XTestFakeMotionEvent(d, SCREEN_DEFAULT, x, y, CURRENT_TIME);
                xlib::XFlush(d);
                ok
            };
            if ok == 0 {
                return Err(PlatformError::failure(
                    "XTestFakeMotionEvent",
                    "server rejected the motion event",
                ));
            }
            Ok(())
        })
    }

    fn scroll_vertical(&self, lines: i32) -> Result<(), PlatformError> {
        let button = if lines >= 0 {
            BUTTON_SCROLL_UP
        } else {
            BUTTON_SCROLL_DOWN
        };
        self.with_display("XTestFakeButtonEvent", |d| {
            for _ in 0..lines.unsigned_abs() {
                // SAFETY: `d` is a live display guarded by the mutex.
                let ok = unsafe {
                    let press = xtest::XTestFakeButtonEvent(d, button, xlib::True, CURRENT_TIME);
                    let release = xtest::XTestFakeButtonEvent(d, button, xlib::False, CURRENT_TIME);
                    xlib::XFlush(d);
                    press != 0 && release != 0
                };
                if !ok {
                    return Err(PlatformError::failure(
                        "XTestFakeButtonEvent",
                        format!("server rejected wheel button {button}"),
                    ));
                }
            }
            Ok(())
        })
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        self.with_display("XQueryPointer", |d| {
            let (mut root_return, mut child_return) = (0, 0);
            let (mut root_x, mut root_y, mut win_x, mut win_y) = (0, 0, 0, 0);
            let mut mask = 0;
            // SAFETY: `d` is live and all out-pointers are live locals.
            let same_screen = unsafe {
                let root = xlib::XDefaultRootWindow(d);
                xlib::XQueryPointer(
                    d,
                    root,
                    &mut root_return,
                    &mut child_return,
                    &mut root_x,
                    &mut root_y,
                    &mut win_x,
                    &mut win_y,
                    &mut mask,
                )
            };
            if same_screen == 0 {
                return Err(PlatformError::failure(
                    "XQueryPointer",
                    "pointer is not on the default screen",
                ));
            }
            Ok(Point::new(root_x, root_y))
        })
    }

    fn screen_size(&self) -> Result<ScreenBounds, PlatformError> {
        self.with_display("XDisplayWidth", |d| {
            // SAFETY: `d` is live; the screen number comes from Xlib itself.
            let (width, height) = unsafe {
                let screen = xlib::XDefaultScreen(d);
                (xlib::XDisplayWidth(d, screen), xlib::XDisplayHeight(d, screen))
            };
            if width <= 0 || height <= 0 {
                return Err(PlatformError::failure(
                    "XDisplayWidth",
                    format!("reported a {width}x{height} screen"),
                ));
            }
            Ok(ScreenBounds::new(width, height))
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// If a display is available the driver must open and report a sane
    /// screen; otherwise construction must fail with a Failure error.
    #[test]
    fn test_linux_driver_smoke() {
        match LinuxXTestDriver::new() {
            Ok(driver) => {
                let bounds = driver.screen_size().expect("screen size on a live display");
                assert!(bounds.width > 0 && bounds.height > 0);
            }
            Err(e) => assert!(!e.is_unsupported(), "unexpected error kind: {e}"),
        }
    }
}
