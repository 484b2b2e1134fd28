//! End-to-end tests for the analysis pipeline: generated datasets flow
//! through SCC detection, condensation, topological ordering and path
//! analysis, and the structural properties of each stage hold.

use std::collections::HashSet;

use taskgraph::dataset::{DEFAULT_SEED, DatasetSpec, generate, standard_specs};
use taskgraph::graph::{NodeId, TaskGraph};
use taskgraph::metrics::Metrics;
use taskgraph::parser::{load_dataset, save_dataset};
use taskgraph::paths::{UNREACHABLE, find_critical_path, shortest_paths};
use taskgraph::scc::{build_condensation, find_sccs};
use taskgraph::topo::{derive_task_order, representative_order, topo_sort};
use tempfile::TempDir;

// ===========================================================================
// Helpers
// ===========================================================================

fn graph_from(adj: &[&[NodeId]]) -> TaskGraph {
    let mut graph = TaskGraph::new(adj.len());
    for (from, succs) in adj.iter().enumerate() {
        for &to in *succs {
            graph.add_edge(from, to);
        }
    }
    graph
}

fn position(order: &[NodeId], node: NodeId) -> usize {
    order.iter().position(|&n| n == node).unwrap()
}

// ===========================================================================
// Structural properties over the standard generated datasets
// ===========================================================================

#[test]
fn sccs_partition_every_standard_dataset() {
    for spec in standard_specs() {
        let dataset = generate(&spec, DEFAULT_SEED);
        let sccs = find_sccs(&dataset.graph, &mut Metrics::new());

        let mut seen = HashSet::new();
        let mut total = 0;
        for scc in &sccs {
            for &node in &scc.members {
                assert!(seen.insert(node), "{}: node {} in two SCCs", spec.name, node);
                total += 1;
            }
        }
        assert_eq!(total, dataset.graph.len(), "{}: partition incomplete", spec.name);
    }
}

#[test]
fn condensation_of_every_standard_dataset_is_acyclic() {
    for spec in standard_specs() {
        let dataset = generate(&spec, DEFAULT_SEED);
        let sccs = find_sccs(&dataset.graph, &mut Metrics::new());
        let condensation = build_condensation(&dataset.graph, &sccs);

        let order = topo_sort(&condensation, &mut Metrics::new());
        assert!(order.complete, "{}: condensation has a cycle", spec.name);
    }
}

#[test]
fn topo_order_length_detects_cycles() {
    for spec in standard_specs() {
        let dataset = generate(&spec, DEFAULT_SEED);
        let result = topo_sort(&dataset.graph, &mut Metrics::new());

        if result.complete {
            assert_eq!(result.order.len(), dataset.graph.len());
            for (from, to) in dataset.graph.edges() {
                assert!(
                    position(&result.order, from) < position(&result.order, to),
                    "{}: edge {} -> {} out of order",
                    spec.name,
                    from,
                    to
                );
            }
        } else {
            assert!(result.order.len() < dataset.graph.len());
        }
    }
}

#[test]
fn critical_path_length_matches_its_duration_sum() {
    for spec in standard_specs() {
        let dataset = generate(&spec, DEFAULT_SEED);
        let order = topo_sort(&dataset.graph, &mut Metrics::new());
        if !order.complete {
            continue;
        }

        let critical = find_critical_path(
            &dataset.graph,
            &dataset.durations,
            &order.order,
            &mut Metrics::new(),
        )
        .unwrap();
        let sum: u64 = critical.path.iter().map(|&n| dataset.durations[n]).sum();
        assert_eq!(critical.length, sum, "{}", spec.name);

        // No single node can beat the reported maximum.
        for &d in &dataset.durations {
            assert!(d <= critical.length);
        }
    }
}

#[test]
fn shortest_distances_satisfy_relaxation_on_acyclic_datasets() {
    for spec in standard_specs() {
        let dataset = generate(&spec, DEFAULT_SEED);
        let order = topo_sort(&dataset.graph, &mut Metrics::new());
        if !order.complete || dataset.graph.is_empty() {
            continue;
        }

        let result = shortest_paths(
            &dataset.graph,
            &dataset.durations,
            &order.order,
            0,
            &mut Metrics::new(),
        )
        .unwrap();
        // No edge can be relaxed any further once the pass is done.
        for (from, to) in dataset.graph.edges() {
            if result.dist[from] != UNREACHABLE {
                assert!(
                    result.dist[to] <= result.dist[from] + dataset.durations[to],
                    "{}: edge {} -> {} not fully relaxed",
                    spec.name,
                    from,
                    to
                );
            }
        }
        assert_eq!(result.dist[0], dataset.durations[0]);
    }
}

// ===========================================================================
// The documented scenarios
// ===========================================================================

#[test]
fn scenario_cycle_plus_chain_has_three_sccs() {
    let graph = graph_from(&[&[1], &[2], &[0], &[4], &[]]);
    let sccs = find_sccs(&graph, &mut Metrics::new());
    assert_eq!(sccs.len(), 3);

    let big = sccs.iter().find(|s| s.members.len() == 3).unwrap();
    let members: HashSet<NodeId> = big.members.iter().copied().collect();
    assert_eq!(members, HashSet::from([0, 1, 2]));
    assert_eq!(sccs.iter().filter(|s| s.members.len() == 1).count(), 2);
}

#[test]
fn scenario_diamond_topological_order() {
    let graph = graph_from(&[&[1, 2], &[3], &[3], &[]]);
    let result = topo_sort(&graph, &mut Metrics::new());
    assert!(result.complete);
    assert_eq!(result.order.len(), 4);
    assert!(position(&result.order, 0) < position(&result.order, 1));
    assert!(position(&result.order, 0) < position(&result.order, 2));
    assert!(position(&result.order, 1) < position(&result.order, 3));
    assert!(position(&result.order, 2) < position(&result.order, 3));
}

#[test]
fn scenario_diamond_critical_path() {
    let graph = graph_from(&[&[1, 2], &[3], &[3], &[]]);
    let order = topo_sort(&graph, &mut Metrics::new());
    let critical =
        find_critical_path(&graph, &[2, 3, 1, 4], &order.order, &mut Metrics::new()).unwrap();
    assert_eq!(critical.path, vec![0, 1, 3]);
    assert_eq!(critical.length, 9);
}

#[test]
fn scenario_chain_shortest_distances() {
    let graph = graph_from(&[&[1], &[2], &[]]);
    let order = topo_sort(&graph, &mut Metrics::new());
    let result =
        shortest_paths(&graph, &[1, 2, 3], &order.order, 0, &mut Metrics::new()).unwrap();
    assert_eq!(result.dist, vec![1, 3, 6]);
}

#[test]
fn scenario_isolated_nodes() {
    let graph = TaskGraph::new(3);
    let sccs = find_sccs(&graph, &mut Metrics::new());
    assert_eq!(sccs.len(), 3);
    assert!(sccs.iter().all(|s| s.members.len() == 1));

    let order = topo_sort(&graph, &mut Metrics::new());
    assert!(order.complete);
    assert_eq!(order.order.len(), 3);
}

// ===========================================================================
// Cyclic-input pipeline: condensation fallback
// ===========================================================================

#[test]
fn cyclic_graph_analyzes_through_the_condensation() {
    // 0 -> 1 -> 2 -> 0 (cycle), 2 -> 3 -> 4 (tail)
    let graph = graph_from(&[&[1], &[2], &[0, 3], &[4], &[]]);
    let durations = [2u64, 3, 1, 4, 2];

    let direct = topo_sort(&graph, &mut Metrics::new());
    assert!(!direct.complete);

    let sccs = find_sccs(&graph, &mut Metrics::new());
    let condensation = build_condensation(&graph, &sccs);
    let component_order = topo_sort(&condensation, &mut Metrics::new());
    assert!(component_order.complete);

    // The flattened task order covers every node exactly once.
    let task_order = derive_task_order(&component_order.order, &sccs);
    let unique: HashSet<NodeId> = task_order.iter().copied().collect();
    assert_eq!(task_order.len(), graph.len());
    assert_eq!(unique.len(), graph.len());

    // The representative projection is a valid partial order, so the
    // path analyzer accepts it.
    let projection = representative_order(&component_order.order, &sccs);
    assert_eq!(projection.len(), sccs.len());
    let critical =
        find_critical_path(&graph, &durations, &projection, &mut Metrics::new()).unwrap();
    let sum: u64 = critical.path.iter().map(|&n| durations[n]).sum();
    assert_eq!(critical.length, sum);
}

// ===========================================================================
// Persistence round trip feeding the pipeline
// ===========================================================================

#[test]
fn saved_dataset_reloads_and_analyzes_identically() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("medium_cyclic.json");
    let dataset = generate(&DatasetSpec::new("medium_cyclic", 20, 0.4, true, 3), DEFAULT_SEED);

    save_dataset(&dataset, &path).unwrap();
    let reloaded = load_dataset(&path).unwrap();
    assert_eq!(reloaded, dataset);

    let before = find_sccs(&dataset.graph, &mut Metrics::new());
    let after = find_sccs(&reloaded.graph, &mut Metrics::new());
    assert_eq!(before, after);
}
