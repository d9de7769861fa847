//! The Motion Planner: target selection and lazy path synthesis.

pub mod easing;
pub mod planner;
