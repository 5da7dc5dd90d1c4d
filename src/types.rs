//! Various types related to degree counting.

use derive_more::Display;

/// The node id type.
pub type NodeId = u32;

/// The degree counter type.
pub type Degree = u32;

/// A directed edge `from -> to`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "({}, {})", from, to)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((from, to): (NodeId, NodeId)) -> Self {
        Self { from, to }
    }
}
