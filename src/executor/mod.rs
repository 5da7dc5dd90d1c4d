//! Degree aggregation over partitioned edge slices.

pub use aggregate::{aggregate, parallel_degrees, sequential_degrees, worker_pool};

mod aggregate;
