//! Strongly connected component detection (Tarjan) and the condensation
//! graph built from it.
//!
//! Uses an iterative DFS with an explicit work-stack to avoid stack
//! overflow on long dependency chains, while keeping the low-link update
//! order of the recursive formulation.
//! Reference: Tarjan, "Depth-First Search and Linear Graph Algorithms," SIAM 1972.

use crate::graph::{NodeId, TaskGraph};
use crate::metrics::Metrics;

/// A strongly connected component: a maximal set of nodes where every node
/// is reachable from every other node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scc {
    /// The node IDs in this SCC, in no particular order.
    pub members: Vec<NodeId>,
}

const UNDEFINED: i64 = -1;

/// Finds all strongly connected components of `graph`.
///
/// The returned components partition `0..n`: every node appears in
/// exactly one. List order is the order in which each component's root is
/// closed — deterministic for a fixed adjacency order, not sorted.
///
/// Metrics: the timer spans the whole traversal; the DFS-visit counter is
/// bumped once per node discovered and once per successor examined.
///
/// # Complexity
/// * Time: O(V + E)
/// * Space: O(V)
pub fn find_sccs(graph: &TaskGraph, metrics: &mut Metrics) -> Vec<Scc> {
    let nodes = graph.len();
    let mut index = vec![UNDEFINED; nodes];
    let mut low_link = vec![0i64; nodes];
    let mut on_stack = vec![false; nodes];

    let mut stack: Vec<NodeId> = Vec::new();
    let mut next_index: i64 = 0;
    let mut components: Vec<Scc> = Vec::new();

    // Explicit DFS frame: node plus a cursor into its successor list.
    struct Frame {
        node: NodeId,
        next_successor: usize,
    }

    metrics.start_timer();

    for start in 0..nodes {
        if index[start] != UNDEFINED {
            continue;
        }

        metrics.increment_dfs_visits();
        index[start] = next_index;
        low_link[start] = next_index;
        next_index += 1;
        stack.push(start);
        on_stack[start] = true;

        let mut call_stack = vec![Frame {
            node: start,
            next_successor: 0,
        }];

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.node;

            if frame.next_successor < graph.successors(v).len() {
                let w = graph.successors(v)[frame.next_successor];
                frame.next_successor += 1;
                metrics.increment_dfs_visits();

                if index[w] == UNDEFINED {
                    // Tree edge: descend into w. Discovery counts like the
                    // root-loop one does.
                    metrics.increment_dfs_visits();
                    index[w] = next_index;
                    low_link[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call_stack.push(Frame {
                        node: w,
                        next_successor: 0,
                    });
                } else if on_stack[w] {
                    // Back edge to an open ancestor.
                    low_link[v] = low_link[v].min(index[w]);
                }
                // Otherwise w sits in an already-closed component.
            } else {
                // All successors handled. Root check, then propagate the
                // low-link to the parent as a recursive return would.
                if low_link[v] == index[v] {
                    let mut members = Vec::new();
                    loop {
                        // Invariant: v is still on the stack when it is a root.
                        let w = stack.pop().unwrap();
                        on_stack[w] = false;
                        members.push(w);
                        if w == v {
                            break;
                        }
                    }
                    components.push(Scc { members });
                }

                call_stack.pop();
                if let Some(parent) = call_stack.last() {
                    let p = parent.node;
                    low_link[p] = low_link[p].min(low_link[v]);
                }
            }
        }
    }

    metrics.stop_timer();
    log::debug!(
        "found {} strongly connected components in {} nodes",
        components.len(),
        nodes
    );
    components
}

/// Collapses each SCC to a single node and returns the acyclic component
/// graph.
///
/// Component ids are indexes into `sccs`. For every original edge
/// `u -> v` crossing components, one deduplicated edge
/// `comp(u) -> comp(v)` is added; intra-component edges are dropped. The
/// dedup membership check is O(out-degree), fine under the
/// no-parallel-edges invariant of the result.
pub fn build_condensation(graph: &TaskGraph, sccs: &[Scc]) -> TaskGraph {
    let mut component_of = vec![0usize; graph.len()];
    for (comp_id, scc) in sccs.iter().enumerate() {
        for &node in &scc.members {
            component_of[node] = comp_id;
        }
    }

    let mut condensation = TaskGraph::new(sccs.len());
    for (from, to) in graph.edges() {
        let from_comp = component_of[from];
        let to_comp = component_of[to];
        if from_comp != to_comp && !condensation.has_edge(from_comp, to_comp) {
            condensation.add_edge(from_comp, to_comp);
        }
    }

    condensation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topo::topo_sort;

    fn graph_from(adj: &[&[NodeId]]) -> TaskGraph {
        let mut graph = TaskGraph::new(adj.len());
        for (from, succs) in adj.iter().enumerate() {
            for &to in *succs {
                graph.add_edge(from, to);
            }
        }
        graph
    }

    fn sorted_members(scc: &Scc) -> Vec<NodeId> {
        let mut members = scc.members.clone();
        members.sort_unstable();
        members
    }

    #[test]
    fn empty_graph_has_no_components() {
        let graph = TaskGraph::new(0);
        let sccs = find_sccs(&graph, &mut Metrics::new());
        assert!(sccs.is_empty());
    }

    #[test]
    fn isolated_nodes_are_singletons() {
        let graph = TaskGraph::new(3);
        let sccs = find_sccs(&graph, &mut Metrics::new());
        assert_eq!(sccs.len(), 3);
        assert!(sccs.iter().all(|s| s.members.len() == 1));
    }

    #[test]
    fn cycle_plus_chain_yields_three_components() {
        // 0 -> 1 -> 2 -> 0 is one SCC; 3 -> 4 gives two singletons.
        let graph = graph_from(&[&[1], &[2], &[0], &[4], &[]]);
        let sccs = find_sccs(&graph, &mut Metrics::new());
        assert_eq!(sccs.len(), 3);

        let mut sizes: Vec<usize> = sccs.iter().map(|s| s.members.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 1, 3]);

        let big = sccs.iter().find(|s| s.members.len() == 3).unwrap();
        assert_eq!(sorted_members(big), vec![0, 1, 2]);
    }

    #[test]
    fn components_partition_the_node_range() {
        let graph = graph_from(&[&[1, 2], &[2], &[0], &[4], &[3], &[]]);
        let sccs = find_sccs(&graph, &mut Metrics::new());
        let mut seen: Vec<NodeId> = sccs.iter().flat_map(|s| s.members.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..graph.len()).collect::<Vec<_>>());
    }

    #[test]
    fn result_is_deterministic() {
        let graph = graph_from(&[&[1, 2], &[2], &[0], &[4], &[3]]);
        let first = find_sccs(&graph, &mut Metrics::new());
        let second = find_sccs(&graph, &mut Metrics::new());
        assert_eq!(first, second);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        // 10_000-node chain: recursion depth would equal n here.
        let n = 10_000;
        let mut graph = TaskGraph::new(n);
        for i in 0..n - 1 {
            graph.add_edge(i, i + 1);
        }
        let sccs = find_sccs(&graph, &mut Metrics::new());
        assert_eq!(sccs.len(), n);
    }

    #[test]
    fn dfs_visit_accounting() {
        // One bump per node discovered plus one per edge examined. The
        // chain discovers 1 root and 2 tree-edge nodes.
        let graph = graph_from(&[&[1], &[2], &[]]);
        let mut metrics = Metrics::new();
        find_sccs(&graph, &mut metrics);
        assert_eq!(metrics.dfs_visits(), 3 + 2);

        // Ring: 3 discoveries, 3 edges examined (one a back edge).
        let ring = graph_from(&[&[1], &[2], &[0]]);
        let mut metrics = Metrics::new();
        find_sccs(&ring, &mut metrics);
        assert_eq!(metrics.dfs_visits(), 3 + 3);
    }

    #[test]
    fn condensation_collapses_cycle() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3
        let graph = graph_from(&[&[1], &[2], &[0, 3], &[]]);
        let sccs = find_sccs(&graph, &mut Metrics::new());
        assert_eq!(sccs.len(), 2);

        let condensation = build_condensation(&graph, &sccs);
        assert_eq!(condensation.len(), 2);
        assert_eq!(condensation.edge_count(), 1);
    }

    #[test]
    fn condensation_deduplicates_parallel_edges() {
        // Both 0 and 1 (same SCC) point into 2: one condensed edge only.
        let graph = graph_from(&[&[1, 2], &[0, 2], &[]]);
        let sccs = find_sccs(&graph, &mut Metrics::new());
        let condensation = build_condensation(&graph, &sccs);
        assert_eq!(condensation.len(), 2);
        assert_eq!(condensation.edge_count(), 1);
    }

    #[test]
    fn condensation_is_acyclic() {
        let graph = graph_from(&[&[1], &[2], &[0, 3], &[4], &[5], &[3]]);
        let sccs = find_sccs(&graph, &mut Metrics::new());
        let condensation = build_condensation(&graph, &sccs);
        let order = topo_sort(&condensation, &mut Metrics::new());
        assert!(order.complete);
    }
}
