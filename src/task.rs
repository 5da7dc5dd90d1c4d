use crate::{
    data::{DegreeTable, EdgeStore, COMMENT_MARKER},
    error::{Error, Result},
    executor::{parallel_degrees, worker_pool},
    memory_manager::InputBuffer,
    planner::partition,
};
use itertools::Itertools;
use log::info;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

/// The default number of workers.
pub const DEFAULT_WORKERS: usize = 4;

/// How the input file is brought into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Mem,
    Mmap,
}

/// Computes the degree table of one edge-list file.
#[derive(Debug, Clone)]
pub struct DegreeTask {
    path: PathBuf,
    workers: usize,
    marker: u8,
    input_mode: InputMode,
}

/// Everything a run produces.
#[derive(Debug)]
pub struct Outcome {
    pub store: EdgeStore,
    pub degrees: DegreeTable,
    /// Wall-clock time from the start of loading to the final join.
    pub elapsed: Duration,
}

impl DegreeTask {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            workers: DEFAULT_WORKERS,
            marker: COMMENT_MARKER,
            input_mode: InputMode::Mmap,
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn comment_marker(mut self, marker: u8) -> Self {
        self.marker = marker;
        self
    }

    pub fn input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    pub fn run(&self) -> Result<Outcome> {
        if self.workers == 0 {
            return Err(Error::InvalidWorkerCount(self.workers));
        }
        let start_time = Instant::now();
        info!("loading {}", self.path.display());
        let buffer = match self.input_mode {
            InputMode::Mem => InputBuffer::new_mem(&self.path)?,
            InputMode::Mmap => InputBuffer::new_mmap(&self.path)?,
        };
        let store = EdgeStore::from_buffer(&buffer, self.marker)?;
        drop(buffer);
        info!(
            "load_time: {} ({})",
            start_time.elapsed().as_millis(),
            store
        );
        let time_now = Instant::now();
        let slices = partition(store.count(), self.workers);
        info!("edge slices: {}", slices.iter().join(", "));
        let pool = worker_pool(self.workers)?;
        let degrees = parallel_degrees(&pool, &store, &slices)?;
        info!("degree_time: {}", time_now.elapsed().as_millis());
        let elapsed = start_time.elapsed();
        info!("execution time: {:.3} seconds", elapsed.as_secs_f64());
        Ok(Outcome {
            store,
            degrees,
            elapsed,
        })
    }
}
