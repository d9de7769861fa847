//! Application layer: the cycle scheduler and the seams it depends on.
//!
//! Nothing here talks to the OS directly.  Cursor access goes through the
//! [`cursor::CursorDriver`] trait; the concrete drivers live in
//! `crate::infrastructure`.

pub mod cursor;
pub mod run_cycles;
pub mod stop;
