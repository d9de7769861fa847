//! Cursor driver implementations.
//!
//! The native driver is selected at compile time via `#[cfg(target_os)]`.
//! Platforms (or builds) without a backend get [`UnsupportedDriver`], whose
//! primitives all fail with a clear message.

use std::sync::Arc;

use crate::application::cursor::{CursorDriver, PlatformError};

pub mod dry_run;
pub mod mock;
pub mod unsupported;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(all(target_os = "linux", feature = "x11"))]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

pub use dry_run::DryRunDriver;
pub use unsupported::UnsupportedDriver;

/// Name of the platform this binary was built for.
pub const PLATFORM: &str = std::env::consts::OS;

/// Creates the cursor driver for the current platform.
///
/// # Errors
///
/// Returns [`PlatformError`] if the native backend cannot be initialised
/// (for example no X display is reachable).
#[cfg(target_os = "windows")]
pub fn native_driver() -> Result<Arc<dyn CursorDriver>, PlatformError> {
    Ok(Arc::new(windows::WindowsCursorDriver::new()))
}

#[cfg(target_os = "macos")]
pub fn native_driver() -> Result<Arc<dyn CursorDriver>, PlatformError> {
    Ok(Arc::new(macos::MacosCursorDriver::new()))
}

#[cfg(all(target_os = "linux", feature = "x11"))]
pub fn native_driver() -> Result<Arc<dyn CursorDriver>, PlatformError> {
    Ok(Arc::new(linux::LinuxXTestDriver::new()?))
}

#[cfg(all(target_os = "linux", not(feature = "x11")))]
pub fn native_driver() -> Result<Arc<dyn CursorDriver>, PlatformError> {
    Ok(Arc::new(UnsupportedDriver::new(
        PLATFORM,
        "this build has no X11 backend; rebuild with `--features x11`",
    )))
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
pub fn native_driver() -> Result<Arc<dyn CursorDriver>, PlatformError> {
    Ok(Arc::new(UnsupportedDriver::new(PLATFORM, "no cursor backend for this platform")))
}

/// A platform-specific hint printed after a cursor failure, if there is a
/// likely fix the user can apply.
pub fn permission_hint() -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        Some(
            "grant Accessibility access to this terminal in System Settings → \
             Privacy & Security → Accessibility, then restart it",
        )
    } else if cfg!(all(target_os = "linux", feature = "x11")) {
        Some("make sure DISPLAY points to an X11 session this user may access (Wayland sessions usually refuse synthetic input)")
    } else if cfg!(target_os = "linux") {
        Some("rebuild with `cargo build --features x11` to enable the X11 cursor backend")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_driver_constructs_or_reports_failure() {
        // Real backends may legitimately fail without a desktop session; the
        // constructor must never panic either way.
        let _ = native_driver();
    }

    #[test]
    fn test_permission_hint_matches_platform() {
        let hint = permission_hint();
        if cfg!(any(target_os = "macos", target_os = "linux")) {
            assert!(hint.is_some());
        }
    }
}
