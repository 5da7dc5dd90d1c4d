//! Parallel degree counting over static edge lists.

pub mod data;
pub mod error;
pub mod executor;
pub mod memory_manager;
pub mod planner;
pub mod report;
pub mod task;
pub mod types;
