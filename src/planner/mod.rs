//! Partitioning of index ranges across workers.

pub use partition::{partition, split_disjoint, Slice};

mod partition;
