//! jiggle library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does jiggle do?
//!
//! It keeps a desktop session from going idle by moving the cursor the way a
//! hand would: curved, eased paths toward nearby targets with a little
//! jitter, an occasional scroll, and irregular pauses in between.  It stops
//! when the configured number of minutes has passed or on Ctrl-C / SIGTERM.
//!
//! The motion and timing maths live in `jiggle-core`; this crate owns the
//! async loop that turns them into real cursor calls and sleeps.

/// Application layer: cycle scheduler, cursor capability, stop signal.
pub mod application;

/// Command-line parsing and run settings.
pub mod cli;

/// Infrastructure layer: OS cursor drivers, signal listener, tuning file.
pub mod infrastructure;
