use crate::{
    error::{Error, Result},
    memory_manager::InputBuffer,
    types::{Edge, NodeId},
};
use std::{fmt, path::Path};

/// The default header marker of edge-list files.
pub const COMMENT_MARKER: u8 = b'#';

/// The parsed edge list, in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    max_node: Option<NodeId>,
}

impl EdgeStore {
    /// Loads the edge-list file at `path`, memory-mapping it.
    pub fn open<P: AsRef<Path>>(path: P, marker: u8) -> Result<Self> {
        Self::from_buffer(&InputBuffer::new_mmap(path)?, marker)
    }

    pub fn from_buffer(buffer: &InputBuffer, marker: u8) -> Result<Self> {
        Self::from_bytes(buffer.as_bytes(), marker)
    }

    /// Parses an edge list.
    ///
    /// A leading block of lines beginning with `marker` is skipped, blank
    /// lines are ignored, and every other line must hold exactly two node ids
    /// separated by spaces or tabs.
    pub fn from_bytes(bytes: &[u8], marker: u8) -> Result<Self> {
        let mut edges = Vec::new();
        let capacity = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
        edges
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation {
                what: "edges",
                len: capacity,
            })?;
        let mut max_node = None;
        let mut in_header = true;
        for (i, line) in bytes.split(|&b| b == b'\n').enumerate() {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if in_header && line.first() == Some(&marker) {
                continue;
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            in_header = false;
            let edge = parse_edge(line).ok_or_else(|| Error::Malformed {
                line: i + 1,
                content: String::from_utf8_lossy(line).into_owned(),
            })?;
            max_node = max_node.max(Some(edge.from.max(edge.to)));
            edges.push(edge);
        }
        Ok(Self { edges, max_node })
    }

    pub fn from_edges<E>(edges: E) -> Self
    where
        E: IntoIterator,
        E::Item: Into<Edge>,
    {
        let edges: Vec<Edge> = edges.into_iter().map(Into::into).collect();
        let max_node = edges.iter().map(|e| e.from.max(e.to)).max();
        Self { edges, max_node }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The largest node id seen, `None` for an empty store.
    pub fn max_node(&self) -> Option<NodeId> {
        self.max_node
    }

    /// Length of a degree table covering every node id in `[0, max_node]`.
    pub fn node_count(&self) -> usize {
        self.max_node.map_or(0, |max| max as usize + 1)
    }
}

impl fmt::Display for EdgeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} edges, {} nodes", self.count(), self.node_count())
    }
}

fn parse_edge(line: &[u8]) -> Option<Edge> {
    let mut tokens = line
        .split(|b| *b == b' ' || *b == b'\t')
        .filter(|token| !token.is_empty());
    let from = parse_node(tokens.next()?)?;
    let to = parse_node(tokens.next()?)?;
    match tokens.next() {
        None => Some(Edge { from, to }),
        Some(_) => None,
    }
}

fn parse_node(token: &[u8]) -> Option<NodeId> {
    if !token.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(token).ok()?.parse().ok()
}
