//! Windows cursor driver.
//!
//! - Moves with `SetCursorPos` (absolute pixel coordinates on the primary
//!   monitor's coordinate space).
//! - Reads the position with `GetCursorPos` and the primary screen size with
//!   `GetSystemMetrics(SM_CXSCREEN / SM_CYSCREEN)`.
//! - Scrolls by injecting a `MOUSEEVENTF_WHEEL` input through `SendInput`.
//!   One line is one `WHEEL_DELTA` (120); positive values scroll up.

#![cfg(target_os = "windows")]

use jiggle_core::{Point, ScreenBounds};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_WHEEL, MOUSEINPUT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SetCursorPos, SM_CXSCREEN, SM_CYSCREEN,
};

use crate::application::cursor::{CursorDriver, PlatformError};

/// One wheel notch in Windows wheel units.
const WHEEL_DELTA: i32 = 120;

pub struct WindowsCursorDriver;

impl WindowsCursorDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsCursorDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorDriver for WindowsCursorDriver {
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        // SAFETY: SetCursorPos takes plain integers and has no pointer arguments.
        unsafe { SetCursorPos(x, y) }.map_err(|e| PlatformError::failure("SetCursorPos", e.to_string()))
    }

    fn scroll_vertical(&self, lines: i32) -> Result<(), PlatformError> {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: 0,
                    dy: 0,
                    // Signed wheel delta reinterpreted as the DWORD field.
                    mouseData: lines.saturating_mul(WHEEL_DELTA) as u32,
                    dwFlags: MOUSEEVENTF_WHEEL,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        // SAFETY: `input` is a fully initialised MOUSEINPUT and the size
        // argument matches the element type.
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent == 1 {
            Ok(())
        } else {
            Err(PlatformError::failure(
                "SendInput",
                windows::core::Error::from_win32().to_string(),
            ))
        }
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        let mut point = POINT::default();
        // SAFETY: `point` is a valid, writable POINT for the duration of the call.
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| PlatformError::failure("GetCursorPos", e.to_string()))?;
        Ok(Point::new(point.x, point.y))
    }

    fn screen_size(&self) -> Result<ScreenBounds, PlatformError> {
        // SAFETY: GetSystemMetrics has no preconditions.
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        if width <= 0 || height <= 0 {
            return Err(PlatformError::failure(
                "GetSystemMetrics",
                format!("reported a {width}x{height} primary screen"),
            ));
        }
        Ok(ScreenBounds::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_delta_encoding_keeps_sign_bits() {
        assert_eq!((-1i32).saturating_mul(WHEEL_DELTA) as u32, 0xFFFF_FF88);
        assert_eq!(1i32.saturating_mul(WHEEL_DELTA) as u32, 120);
    }
}
