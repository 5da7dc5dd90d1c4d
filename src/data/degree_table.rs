use crate::{
    error::{Error, Result},
    types::{Degree, NodeId},
};
use itertools::Itertools;
use std::{alloc::Layout, io::Write};

/// Per-node degree counters, indexed by node id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DegreeTable {
    degrees: Vec<Degree>,
}

impl DegreeTable {
    /// Allocates `len` zeroed counters.
    pub fn zeroed(len: usize) -> Result<Self> {
        Ok(Self {
            degrees: zeroed_counters(len)?,
        })
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<Degree> {
        self.degrees.get(node as usize).copied()
    }

    pub fn as_slice(&self) -> &[Degree] {
        &self.degrees
    }

    pub fn as_mut_slice(&mut self) -> &mut [Degree] {
        &mut self.degrees
    }

    /// Sum of all counters, twice the number of edges once aggregation is done.
    pub fn total(&self) -> u64 {
        self.degrees.iter().map(|&d| d as u64).sum()
    }

    pub fn max_degree(&self) -> Degree {
        self.degrees.iter().copied().max().unwrap_or(0)
    }

    /// Number of node ids in the table that no edge references.
    pub fn isolated(&self) -> usize {
        self.degrees.iter().filter(|&&d| d == 0).count()
    }

    pub fn average_degree(&self) -> f64 {
        if self.degrees.is_empty() {
            0.0
        } else {
            self.total() as f64 / self.degrees.len() as f64
        }
    }

    /// Returns `(degree, number of nodes with that degree)` by ascending degree.
    pub fn distribution(&self) -> Vec<(Degree, usize)> {
        let mut sorted = self.degrees.clone();
        sorted.sort_unstable();
        sorted
            .into_iter()
            .dedup_with_count()
            .map(|(n, d)| (d, n))
            .collect()
    }

    /// Writes one `node<TAB>degree` line per node.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (node, degree) in self.degrees.iter().enumerate() {
            writeln!(writer, "{}\t{}", node, degree)?;
        }
        writer.flush()
    }
}

impl From<Vec<Degree>> for DegreeTable {
    fn from(degrees: Vec<Degree>) -> Self {
        Self { degrees }
    }
}

/// Allocates `len` zeroed counters without writing to them, so pages stay
/// unmapped until a counter is incremented.
pub(crate) fn zeroed_counters(len: usize) -> Result<Vec<Degree>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    let error = || Error::Allocation {
        what: "degree counters",
        len,
    };
    let layout = Layout::array::<Degree>(len).map_err(|_| error())?;
    let ptr = unsafe { std::alloc::alloc_zeroed(layout) } as *mut Degree;
    if ptr.is_null() {
        return Err(error());
    }
    Ok(unsafe { Vec::from_raw_parts(ptr, len, len) })
}
