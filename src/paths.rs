//! Single-pass path analysis over DAGs: single-source shortest distances
//! and the global critical (longest) path.
//!
//! Both algorithms weight paths by per-node durations, not edge weights,
//! and rely on the supplied topological order: every predecessor of a
//! node is finalized before the node itself is processed, so one forward
//! sweep suffices and no re-relaxation ever happens. The order is
//! validated up front — an order inconsistent with the graph would
//! produce silently wrong distances, so it is rejected instead.

use thiserror::Error;

use crate::graph::{NodeId, TaskGraph};
use crate::metrics::Metrics;

/// Sentinel distance for nodes unreachable from the source. Larger than
/// any feasible duration sum.
pub const UNREACHABLE: u64 = u64::MAX;

/// Rejected inputs to the path analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("durations cover {got} nodes but the graph has {expected}")]
    DurationCountMismatch { got: usize, expected: usize },
    // Field deliberately not named `source`: thiserror would treat it
    // as the error's source and NodeId is not an Error.
    #[error("source node {node} is outside 0..{nodes}")]
    SourceOutOfRange { node: NodeId, nodes: usize },
    #[error("order references node {node} outside 0..{nodes}")]
    OrderOutOfRange { node: NodeId, nodes: usize },
    #[error("order lists node {0} more than once")]
    DuplicateInOrder(NodeId),
    #[error("non-acyclic input: edge {from} -> {to} violates the supplied topological order")]
    NonAcyclicOrder { from: NodeId, to: NodeId },
}

/// Shortest-path result: distances from the source plus predecessor
/// pointers for path reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    /// `dist[i]` = minimum duration sum of a path from the source to `i`
    /// (both endpoints' durations included), or [`UNREACHABLE`].
    pub dist: Vec<u64>,
    /// Predecessor of each node on its shortest path; `None` for the
    /// source and for unreached nodes.
    pub prev: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    /// Reconstructs the shortest path from the source to `target`.
    /// Returns an empty path if `target` is unreachable.
    pub fn path_to(&self, target: NodeId) -> Vec<NodeId> {
        if self.dist[target] == UNREACHABLE {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = self.prev[node];
        }
        path.reverse();
        path
    }
}

/// The maximum-duration path through a DAG and its duration sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPath {
    pub path: Vec<NodeId>,
    pub length: u64,
}

/// Checks that `order` is a duplicate-free sequence of in-range ids that
/// respects every edge whose endpoints both appear in it, and that the
/// duration array is aligned with the graph.
fn check_inputs(graph: &TaskGraph, durations: &[u64], order: &[NodeId]) -> Result<(), PathError> {
    let nodes = graph.len();
    if durations.len() != nodes {
        return Err(PathError::DurationCountMismatch {
            got: durations.len(),
            expected: nodes,
        });
    }

    let mut position: Vec<Option<usize>> = vec![None; nodes];
    for (pos, &node) in order.iter().enumerate() {
        if node >= nodes {
            return Err(PathError::OrderOutOfRange { node, nodes });
        }
        if position[node].is_some() {
            return Err(PathError::DuplicateInOrder(node));
        }
        position[node] = Some(pos);
    }

    for (from, to) in graph.edges() {
        if let (Some(from_pos), Some(to_pos)) = (position[from], position[to])
            && from_pos >= to_pos
        {
            return Err(PathError::NonAcyclicOrder { from, to });
        }
    }

    Ok(())
}

/// Computes single-source shortest distances over a DAG in one forward
/// sweep of `order`.
///
/// `dist[source]` starts at the source's own duration; relaxing an edge
/// `u -> v` proposes `dist[u] + durations[v]`. Nodes not reached keep
/// [`UNREACHABLE`]. The relaxation counter is bumped once per node
/// processed and once per improving relaxation.
pub fn shortest_paths(
    graph: &TaskGraph,
    durations: &[u64],
    order: &[NodeId],
    source: NodeId,
    metrics: &mut Metrics,
) -> Result<ShortestPaths, PathError> {
    check_inputs(graph, durations, order)?;
    if source >= graph.len() {
        return Err(PathError::SourceOutOfRange {
            node: source,
            nodes: graph.len(),
        });
    }

    metrics.start_timer();

    let mut dist = vec![UNREACHABLE; graph.len()];
    let mut prev: Vec<Option<NodeId>> = vec![None; graph.len()];
    dist[source] = durations[source];

    for &node in order {
        metrics.increment_edge_relaxations();
        if dist[node] == UNREACHABLE {
            continue;
        }
        for &successor in graph.successors(node) {
            let candidate = dist[node] + durations[successor];
            if candidate < dist[successor] {
                dist[successor] = candidate;
                prev[successor] = Some(node);
                metrics.increment_edge_relaxations();
            }
        }
    }

    metrics.stop_timer();
    Ok(ShortestPaths { dist, prev })
}

/// Finds the critical (maximum-duration) path of a DAG.
///
/// The same single-pass DP as [`shortest_paths`] with `max` in place of
/// `min` and no fixed source: every node starts as its own one-node path
/// (`longest[i] = durations[i]`). After the sweep the global maximum of
/// `longest` picks the endpoint — scanned in ascending id with
/// strictly-greater updates, so ties keep the lowest id — and the path is
/// rebuilt from predecessor pointers.
pub fn find_critical_path(
    graph: &TaskGraph,
    durations: &[u64],
    order: &[NodeId],
    metrics: &mut Metrics,
) -> Result<CriticalPath, PathError> {
    check_inputs(graph, durations, order)?;

    if graph.is_empty() {
        return Ok(CriticalPath {
            path: Vec::new(),
            length: 0,
        });
    }

    metrics.start_timer();

    let mut longest = durations.to_vec();
    let mut prev: Vec<Option<NodeId>> = vec![None; graph.len()];

    for &node in order {
        for &successor in graph.successors(node) {
            metrics.increment_edge_relaxations();
            let candidate = longest[node] + durations[successor];
            if candidate > longest[successor] {
                longest[successor] = candidate;
                prev[successor] = Some(node);
            }
        }
    }

    let mut max_length = 0u64;
    let mut end_node = 0;
    for (node, &length) in longest.iter().enumerate() {
        if length > max_length {
            max_length = length;
            end_node = node;
        }
    }

    let mut path = Vec::new();
    let mut current = Some(end_node);
    while let Some(node) = current {
        path.push(node);
        current = prev[node];
    }
    path.reverse();

    metrics.stop_timer();
    Ok(CriticalPath {
        path,
        length: max_length,
    })
}
