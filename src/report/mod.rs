//! Timing, resource usage and the JSON report.

pub use metrics::{ComponentMetrics, GraphMetrics, PlaceholderMetrics, Report, SystemMetrics};
pub use usage::{available_memory_kb, ResourceUsage};

mod metrics;
mod usage;
