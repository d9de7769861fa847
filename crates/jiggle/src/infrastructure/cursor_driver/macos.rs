//! macOS cursor driver via Core Graphics.
//!
//! Moves and scrolls are synthesised `CGEvent`s posted to the HID event tap,
//! which requires the Accessibility permission (System Settings → Privacy &
//! Security → Accessibility).  Without it the events are silently dropped
//! by the OS on recent releases, or event creation fails on older ones.
//!
//! Core Graphics uses a top-left origin on the main display, matching the
//! coordinates the planner works in.

#![cfg(target_os = "macos")]

use core_graphics::display::CGDisplay;
use core_graphics::event::{
    CGEvent, CGEventTapLocation, CGEventType, CGMouseButton, ScrollEventUnit,
};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;
use jiggle_core::{Point, ScreenBounds};

use crate::application::cursor::{CursorDriver, PlatformError};

pub struct MacosCursorDriver;

impl MacosCursorDriver {
    pub fn new() -> Self {
        Self
    }

    fn source(operation: &'static str) -> Result<CGEventSource, PlatformError> {
        CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|()| PlatformError::failure(operation, "CGEventSourceCreate returned null"))
    }
}

impl Default for MacosCursorDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorDriver for MacosCursorDriver {
    fn move_cursor_to(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        let source = Self::source("CGEventCreateMouseEvent")?;
        let event = CGEvent::new_mouse_event(
            source,
            CGEventType::MouseMoved,
            CGPoint::new(f64::from(x), f64::from(y)),
            CGMouseButton::Left,
        )
        .map_err(|()| {
            PlatformError::failure("CGEventCreateMouseEvent", "event creation refused")
        })?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn scroll_vertical(&self, lines: i32) -> Result<(), PlatformError> {
        let source = Self::source("CGEventCreateScrollWheelEvent")?;
        let event = CGEvent::new_scroll_event(source, ScrollEventUnit::LINE, 1, lines, 0, 0)
            .map_err(|()| {
                PlatformError::failure("CGEventCreateScrollWheelEvent", "event creation refused")
            })?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        let source = Self::source("CGEventCreate")?;
        // An empty event created from a source carries the current pointer
        // location.
        let event = CGEvent::new(source)
            .map_err(|()| PlatformError::failure("CGEventCreate", "event creation refused"))?;
        let location = event.location();
        Ok(Point::new(location.x.round() as i32, location.y.round() as i32))
    }

    fn screen_size(&self) -> Result<ScreenBounds, PlatformError> {
        let bounds = CGDisplay::main().bounds();
        let (width, height) = (bounds.size.width as i32, bounds.size.height as i32);
        if width <= 0 || height <= 0 {
            return Err(PlatformError::failure(
                "CGDisplayBounds",
                format!("reported a {width}x{height} main display"),
            ));
        }
        Ok(ScreenBounds::new(width, height))
    }
}
