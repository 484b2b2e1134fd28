//! Topological ordering via Kahn's algorithm, plus the component-order
//! flattening helpers used after SCC condensation.

use log::warn;
use std::collections::VecDeque;

use crate::graph::{NodeId, TaskGraph};
use crate::metrics::Metrics;
use crate::scc::Scc;

/// Outcome of a topological sort.
///
/// When the input contains a cycle the sort does not fail: `order` covers
/// only the nodes reachable from a zero-in-degree frontier and `complete`
/// is false. Callers branch on the flag instead of catching an error —
/// cyclic input degrades, it does not abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoOrder {
    /// Emitted nodes, each at most once, respecting every edge among them.
    pub order: Vec<NodeId>,
    /// True iff every node of the graph was emitted.
    pub complete: bool,
}

/// Orders the nodes of `graph` with Kahn's algorithm.
///
/// In-degrees are computed in one scan over all adjacency lists. The FIFO
/// queue is seeded with zero-in-degree nodes in ascending id order, which
/// together with strict FIFO discipline makes the output deterministic:
/// ties among simultaneously-ready nodes resolve by ascending id at
/// seeding time and by discovery order afterwards.
///
/// If the emitted order is shorter than the node count the graph has a
/// cycle; a warning is logged and the partial order is returned with
/// `complete == false`.
pub fn topo_sort(graph: &TaskGraph, metrics: &mut Metrics) -> TopoOrder {
    metrics.start_timer();

    let nodes = graph.len();
    let mut in_degree = vec![0usize; nodes];

    for (_, to) in graph.edges() {
        in_degree[to] += 1;
        metrics.increment_queue_operations();
    }

    let mut queue: VecDeque<NodeId> = VecDeque::new();
    for (node, &degree) in in_degree.iter().enumerate() {
        if degree == 0 {
            queue.push_back(node);
            metrics.increment_queue_operations();
        }
    }

    let mut order: Vec<NodeId> = Vec::with_capacity(nodes);

    while let Some(node) = queue.pop_front() {
        metrics.increment_queue_operations();
        order.push(node);

        for &successor in graph.successors(node) {
            in_degree[successor] -= 1;
            if in_degree[successor] == 0 {
                queue.push_back(successor);
                metrics.increment_queue_operations();
            }
        }
    }

    metrics.stop_timer();

    let complete = order.len() == nodes;
    if !complete {
        warn!(
            "graph contains cycles; topological order covers {} of {} nodes",
            order.len(),
            nodes
        );
    }

    TopoOrder { order, complete }
}

/// Flattens a topological order of components into a flat node order.
///
/// Each component's member list is concatenated in its internal order —
/// members of one SCC are mutually reachable, so they have no topological
/// order among themselves to recover.
pub fn derive_task_order(component_order: &[NodeId], sccs: &[Scc]) -> Vec<NodeId> {
    let mut task_order = Vec::new();
    for &comp_id in component_order {
        task_order.extend_from_slice(&sccs[comp_id].members);
    }
    task_order
}

/// Projects a component order onto one representative node per component
/// (the first member). Used to run the path analyzer over a cyclic graph:
/// the projection is consistent with the condensation DAG, so it is a
/// valid partial order of the original graph.
pub fn representative_order(component_order: &[NodeId], sccs: &[Scc]) -> Vec<NodeId> {
    component_order
        .iter()
        .map(|&comp_id| sccs[comp_id].members[0])
        .collect()
}
