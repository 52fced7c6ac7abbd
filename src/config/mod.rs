//! Configuration module for the budget planner
//!
//! - Platform path resolution and per-user storage layout
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::PlannerPaths;
pub use settings::Settings;
