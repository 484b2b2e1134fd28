//! Instrumentation collector shared across algorithm runs.
//!
//! A [`Metrics`] instance is owned by the caller and passed `&mut` into
//! each algorithm invocation. It records elapsed wall time between
//! `start_timer`/`stop_timer` and three work counters; it never influences
//! control flow. Not thread-safe — give each concurrent analysis its own
//! instance.

use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Process-scoped counters and a timer for one or more algorithm runs.
///
/// Lifecycle: construct → pass into calls → read → `reset`. `reset`
/// clears the counters; the elapsed time always reflects the most recent
/// `start_timer`/`stop_timer` pair.
#[derive(Debug, Default)]
pub struct Metrics {
    started: Option<Instant>,
    elapsed: Duration,
    dfs_visits: u64,
    edge_relaxations: u64,
    queue_operations: u64,
}

/// A plain-data copy of the collector state, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub elapsed_ns: u128,
    pub dfs_visits: u64,
    pub edge_relaxations: u64,
    pub queue_operations: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn stop_timer(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = started.elapsed();
        }
    }

    /// Nanoseconds between the most recent timer start and stop.
    pub fn elapsed_nanos(&self) -> u128 {
        self.elapsed.as_nanos()
    }

    pub fn increment_dfs_visits(&mut self) {
        self.dfs_visits += 1;
    }

    pub fn increment_edge_relaxations(&mut self) {
        self.edge_relaxations += 1;
    }

    pub fn increment_queue_operations(&mut self) {
        self.queue_operations += 1;
    }

    pub fn dfs_visits(&self) -> u64 {
        self.dfs_visits
    }

    pub fn edge_relaxations(&self) -> u64 {
        self.edge_relaxations
    }

    pub fn queue_operations(&self) -> u64 {
        self.queue_operations
    }

    /// Clears the counters for the next algorithm run.
    pub fn reset(&mut self) {
        self.dfs_visits = 0;
        self.edge_relaxations = 0;
        self.queue_operations = 0;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            elapsed_ns: self.elapsed_nanos(),
            dfs_visits: self.dfs_visits,
            edge_relaxations: self.edge_relaxations,
            queue_operations: self.queue_operations,
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time={} ns, dfs_visits={}, edge_relaxations={}, queue_operations={}",
            self.elapsed_nanos(),
            self.dfs_visits,
            self.edge_relaxations,
            self.queue_operations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_and_reset() {
        let mut metrics = Metrics::new();
        metrics.increment_dfs_visits();
        metrics.increment_dfs_visits();
        metrics.increment_edge_relaxations();
        metrics.increment_queue_operations();
        assert_eq!(metrics.dfs_visits(), 2);
        assert_eq!(metrics.edge_relaxations(), 1);
        assert_eq!(metrics.queue_operations(), 1);

        metrics.reset();
        assert_eq!(metrics.dfs_visits(), 0);
        assert_eq!(metrics.edge_relaxations(), 0);
        assert_eq!(metrics.queue_operations(), 0);
    }

    #[test]
    fn timer_records_elapsed_time() {
        let mut metrics = Metrics::new();
        metrics.start_timer();
        std::thread::sleep(Duration::from_millis(1));
        metrics.stop_timer();
        assert!(metrics.elapsed_nanos() > 0);
    }

    #[test]
    fn stop_without_start_is_a_no_op() {
        let mut metrics = Metrics::new();
        metrics.stop_timer();
        assert_eq!(metrics.elapsed_nanos(), 0);
    }

    #[test]
    fn snapshot_mirrors_counters() {
        let mut metrics = Metrics::new();
        metrics.increment_queue_operations();
        let snap = metrics.snapshot();
        assert_eq!(snap.queue_operations, 1);
        assert_eq!(snap.dfs_visits, 0);
    }

    #[test]
    fn display_includes_all_fields() {
        let metrics = Metrics::new();
        let text = metrics.to_string();
        assert!(text.contains("dfs_visits=0"));
        assert!(text.contains("edge_relaxations=0"));
        assert!(text.contains("queue_operations=0"));
    }
}
