//! The edge list and the degree counters computed from it.

pub use degree_table::DegreeTable;
pub use edge_store::{EdgeStore, COMMENT_MARKER};

pub(crate) use degree_table::zeroed_counters;

mod degree_table;
mod edge_store;
