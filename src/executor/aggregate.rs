use crate::{
    data::{zeroed_counters, DegreeTable, EdgeStore},
    error::{Error, Result},
    planner::{partition, split_disjoint, Slice},
    types::{Degree, Edge},
};
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::ops::Range;

/// Builds a pool of exactly `workers` threads.
pub fn worker_pool(workers: usize) -> Result<ThreadPool> {
    if workers == 0 {
        return Err(Error::InvalidWorkerCount(workers));
    }
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("degree-worker-{}", i))
        .build()
        .map_err(|e| Error::WorkerPool(e.to_string()))
}

/// Counts both endpoints of every edge in `slice` into `degrees`.
///
/// `degrees` must cover every node id referenced by `edges`.
pub fn aggregate(edges: &[Edge], slice: Slice, degrees: &mut [Degree]) {
    aggregate_from(edges, slice, 0, degrees);
}

/// Like `aggregate`, with `counts[0]` standing for node `base`.
fn aggregate_from(edges: &[Edge], slice: Slice, base: usize, counts: &mut [Degree]) {
    for edge in &edges[slice.range()] {
        counts[edge.from as usize - base] += 1;
        counts[edge.to as usize - base] += 1;
    }
}

/// Private counters of one task, covering only the node ids its slice touches.
#[derive(Debug, Default)]
struct Partial {
    base: usize,
    counts: Vec<Degree>,
}

impl Partial {
    fn count(edges: &[Edge], slice: Slice) -> Result<Self> {
        let bounds = edges[slice.range()]
            .iter()
            .map(|e| (e.from.min(e.to) as usize, e.from.max(e.to) as usize))
            .fold(None, |acc: Option<(usize, usize)>, (lo, hi)| match acc {
                None => Some((lo, hi)),
                Some((min, max)) => Some((min.min(lo), max.max(hi))),
            });
        let (min, max) = match bounds {
            None => return Ok(Self::default()),
            Some(bounds) => bounds,
        };
        let mut counts = zeroed_counters(max - min + 1)?;
        aggregate_from(edges, slice, min, &mut counts);
        Ok(Self { base: min, counts })
    }

    fn nodes(&self) -> Range<usize> {
        self.base..self.base + self.counts.len()
    }
}

/// Single-threaded aggregation over the whole store.
pub fn sequential_degrees(store: &EdgeStore) -> Result<DegreeTable> {
    let mut table = DegreeTable::zeroed(store.node_count())?;
    aggregate(
        store.edges(),
        Slice::new(0, store.count()),
        table.as_mut_slice(),
    );
    Ok(table)
}

/// Aggregates one task per entry of `slices` on `pool` and returns once every
/// task has finished.
///
/// Each task counts its edges into private counters sized to the node ids its
/// slice references. The output table is then cut into disjoint node ranges,
/// one per task, and every task sums the private counters of its range, so no
/// counter is ever written by two threads. A panicking task fails the whole
/// call.
pub fn parallel_degrees(
    pool: &ThreadPool,
    store: &EdgeStore,
    slices: &[Slice],
) -> Result<DegreeTable> {
    if slices.is_empty() {
        return Err(Error::InvalidWorkerCount(0));
    }
    let num_nodes = store.node_count();
    let edges = store.edges();
    let mut table = DegreeTable::zeroed(num_nodes)?;
    if let [slice] = slices {
        pool.install(|| aggregate(edges, *slice, table.as_mut_slice()));
        return Ok(table);
    }
    let mut partials: Vec<Result<Partial>> =
        slices.iter().map(|_| Ok(Partial::default())).collect();
    pool.scope(|s| {
        for (&slice, partial) in slices.iter().zip(partials.iter_mut()) {
            s.spawn(move |_| {
                debug!("counting edges {}", slice);
                *partial = Partial::count(edges, slice);
            });
        }
    });
    let partials = partials.into_iter().collect::<Result<Vec<_>>>()?;
    let partials = &partials;
    let node_slices = partition(num_nodes, slices.len());
    let outputs = split_disjoint(table.as_mut_slice(), &node_slices);
    pool.scope(|s| {
        for (&range, output) in node_slices.iter().zip(outputs) {
            s.spawn(move |_| {
                debug!("merging nodes {}", range);
                merge(partials, range, output);
            });
        }
    });
    Ok(table)
}

// Only nonzero counts are written, so untouched pages of `output` stay unmapped.
fn merge(partials: &[Partial], range: Slice, output: &mut [Degree]) {
    for partial in partials {
        let nodes = partial.nodes();
        let (start, end) = (range.start.max(nodes.start), range.end.min(nodes.end));
        if start >= end {
            continue;
        }
        let counts = &partial.counts[start - partial.base..end - partial.base];
        let output = &mut output[start - range.start..end - range.start];
        for (out, &count) in output.iter_mut().zip(counts) {
            if count != 0 {
                *out += count;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn triangle() -> EdgeStore {
        EdgeStore::from_edges(vec![(0, 1), (1, 2), (0, 2)])
    }

    #[test]
    fn test_aggregate_slice() {
        let store = triangle();
        let mut degrees = vec![0; 3];
        aggregate(store.edges(), Slice::new(1, 3), &mut degrees);
        assert_eq!(degrees, vec![1, 1, 2]);
        aggregate(store.edges(), Slice::new(2, 2), &mut degrees);
        assert_eq!(degrees, vec![1, 1, 2]);
    }

    #[test]
    fn test_partial_covers_touched_nodes() {
        let store = EdgeStore::from_edges(vec![(0, 1), (9, 5), (7, 6), (2, 3)]);
        let partial = Partial::count(store.edges(), Slice::new(1, 3)).unwrap();
        assert_eq!(partial.nodes(), 5..10);
        assert_eq!(partial.counts, vec![1, 1, 1, 0, 1]);
        let empty = Partial::count(store.edges(), Slice::new(2, 2)).unwrap();
        assert_eq!(empty.nodes(), 0..0);
    }

    #[test]
    fn test_triangle_two_workers() {
        let store = triangle();
        let slices = partition(store.count(), 2);
        assert_eq!(slices, vec![Slice::new(0, 1), Slice::new(1, 3)]);
        let table = parallel_degrees(&worker_pool(2).unwrap(), &store, &slices).unwrap();
        assert_eq!(table.as_slice(), &[2, 2, 2]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_self_loop_and_gaps() {
        let store = EdgeStore::from_edges(vec![(3, 3), (0, 5)]);
        let pool = worker_pool(4).unwrap();
        let table = parallel_degrees(&pool, &store, &partition(2, 4)).unwrap();
        assert_eq!(table.as_slice(), &[1, 0, 0, 2, 0, 1]);
    }

    #[test]
    fn test_sparse_ids() {
        let store = EdgeStore::from_edges(vec![(0, 5_000_000), (1, 2), (4_999_999, 3)]);
        let pool = worker_pool(4).unwrap();
        let table = parallel_degrees(&pool, &store, &partition(3, 4)).unwrap();
        assert_eq!(table.len(), 5_000_001);
        assert_eq!(table.get(0), Some(1));
        assert_eq!(table.get(3), Some(1));
        assert_eq!(table.get(4_999_999), Some(1));
        assert_eq!(table.get(5_000_000), Some(1));
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_empty_store() {
        let store = EdgeStore::default();
        let pool = worker_pool(4).unwrap();
        let table = parallel_degrees(&pool, &store, &partition(0, 4)).unwrap();
        assert!(table.is_empty());
        assert!(sequential_degrees(&store).unwrap().is_empty());
    }

    #[test]
    fn test_single_worker() {
        let store = triangle();
        let pool = worker_pool(1).unwrap();
        let table = parallel_degrees(&pool, &store, &partition(3, 1)).unwrap();
        assert_eq!(table, sequential_degrees(&store).unwrap());
    }

    #[test]
    fn test_zero_workers() {
        assert!(matches!(worker_pool(0), Err(Error::InvalidWorkerCount(0))));
    }

    #[test]
    fn test_no_slices() {
        let pool = worker_pool(1).unwrap();
        assert!(matches!(
            parallel_degrees(&pool, &triangle(), &[]),
            Err(Error::InvalidWorkerCount(0))
        ));
    }

    fn edge_lists() -> impl Strategy<Value = Vec<(u32, u32)>> {
        prop::collection::vec((0u32..200, 0u32..200), 0..500)
    }

    proptest! {
        #[test]
        fn degrees_sum_to_twice_the_edges(edges in edge_lists(), workers in 1usize..9) {
            let store = EdgeStore::from_edges(edges);
            let pool = worker_pool(workers).unwrap();
            let slices = partition(store.count(), workers);
            let table = parallel_degrees(&pool, &store, &slices).unwrap();
            prop_assert_eq!(table.total(), 2 * store.count() as u64);
            prop_assert_eq!(table.len(), store.node_count());
        }

        #[test]
        fn parallel_matches_sequential(edges in edge_lists(), workers in 1usize..9) {
            let store = EdgeStore::from_edges(edges);
            let pool = worker_pool(workers).unwrap();
            let slices = partition(store.count(), workers);
            let table = parallel_degrees(&pool, &store, &slices).unwrap();
            prop_assert_eq!(table, sequential_degrees(&store).unwrap());
        }
    }
}
