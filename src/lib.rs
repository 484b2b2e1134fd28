//! Dependency-graph analysis for task scheduling.
//!
//! Three tightly coupled algorithms over one graph representation:
//! strongly-connected-component detection (Tarjan), topological ordering
//! (Kahn), and DAG path analysis (critical path / shortest paths) driven
//! by per-node durations. The condensation graph bridges cyclic inputs to
//! the DAG algorithms. Dataset generation and JSON persistence live
//! alongside as collaborators; the algorithms themselves do no I/O.

pub mod dataset;
pub mod graph;
pub mod metrics;
pub mod parser;
pub mod paths;
pub mod scc;
pub mod topo;

pub use dataset::{Dataset, DatasetSpec, generate, standard_specs};
pub use graph::{GraphError, NodeId, TaskGraph};
pub use metrics::{Metrics, MetricsSnapshot};
pub use parser::{ParseError, load_dataset, save_dataset};
pub use paths::{
    CriticalPath, PathError, ShortestPaths, UNREACHABLE, find_critical_path, shortest_paths,
};
pub use scc::{Scc, build_condensation, find_sccs};
pub use topo::{TopoOrder, derive_task_order, representative_order, topo_sort};
