//! Profiling seam composed into the DBV/DBP façades. `NoProfiler` is a zero-cost default;
//! `BasicProfiler` records wall-clock time per operation kind for diagnostics, grounded on
//! `BpProfiler.h`'s `NoProfiler`/`BasicProfiler` split.

use std::time::{Duration, Instant};
use tracing::debug;

use crate::traits::Profiler;

/// Does nothing; every method inlines to a no-op so it costs nothing in a release build.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProfiler;

impl Profiler for NoProfiler {}

/// Accumulates total time spent per operation kind and logs a summary on drop.
#[derive(Debug, Default)]
pub struct BasicProfiler {
    insert: Duration,
    delete: Duration,
    rank: Duration,
    select: Duration,
    insert_start: Option<Instant>,
    delete_start: Option<Instant>,
    rank_start: Option<Instant>,
    select_start: Option<Instant>,
}

impl Profiler for BasicProfiler {
    fn start_insert(&mut self) {
        self.insert_start = Some(Instant::now());
    }

    fn end_insert(&mut self) {
        if let Some(start) = self.insert_start.take() {
            self.insert += start.elapsed();
        }
    }

    fn start_delete(&mut self) {
        self.delete_start = Some(Instant::now());
    }

    fn end_delete(&mut self) {
        if let Some(start) = self.delete_start.take() {
            self.delete += start.elapsed();
        }
    }

    fn start_rank(&mut self) {
        self.rank_start = Some(Instant::now());
    }

    fn end_rank(&mut self) {
        if let Some(start) = self.rank_start.take() {
            self.rank += start.elapsed();
        }
    }

    fn start_select(&mut self) {
        self.select_start = Some(Instant::now());
    }

    fn end_select(&mut self) {
        if let Some(start) = self.select_start.take() {
            self.select += start.elapsed();
        }
    }
}

impl Drop for BasicProfiler {
    fn drop(&mut self) {
        debug!(
            insert = ?self.insert,
            delete = ?self.delete,
            rank = ?self.rank,
            select = ?self.select,
            "profiler summary"
        );
    }
}
