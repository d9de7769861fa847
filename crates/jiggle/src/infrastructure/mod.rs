//! Infrastructure layer: OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `jiggle_core`, but MUST NOT be imported by either of them.
//!
//! # Sub-modules
//!
//! - **`cursor_driver`** – Implementations of `CursorDriver`.  The native one
//!   is selected at compile time with `#[cfg(target_os)]`; the dry-run driver
//!   prints instead of moving, and a recording mock serves the tests.
//!
//! - **`signals`** – Raises the stop signal on Ctrl-C (and SIGTERM on Unix).
//!
//! - **`tuning_file`** – Loads an optional TOML file of tuning overrides.

pub mod cursor_driver;
pub mod signals;
pub mod tuning_file;
