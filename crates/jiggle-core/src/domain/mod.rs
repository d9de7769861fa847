//! Domain types shared by the planner and the application layer.

pub mod geometry;
