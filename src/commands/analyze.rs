use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use taskgraph::dataset::Dataset;
use taskgraph::graph::NodeId;
use taskgraph::metrics::{Metrics, MetricsSnapshot};
use taskgraph::parser::load_dataset;
use taskgraph::paths::{UNREACHABLE, find_critical_path, shortest_paths};
use taskgraph::scc::{build_condensation, find_sccs};
use taskgraph::topo::{derive_task_order, representative_order, topo_sort};

#[derive(Serialize)]
struct SccReport {
    count: usize,
    sizes: Vec<usize>,
    metrics: MetricsSnapshot,
}

#[derive(Serialize)]
struct OrderingReport {
    condensation_nodes: usize,
    condensation_edges: usize,
    component_order: Vec<NodeId>,
    task_order: Vec<NodeId>,
    metrics: MetricsSnapshot,
}

#[derive(Serialize)]
struct CriticalPathReport {
    /// True when the original graph was cyclic and the analysis ran over
    /// the representative-node projection of the component order.
    used_condensation_fallback: bool,
    path: Vec<NodeId>,
    length: u64,
    metrics: MetricsSnapshot,
}

#[derive(Serialize)]
struct AnalysisReport {
    name: String,
    nodes: usize,
    edges: usize,
    acyclic: bool,
    sccs: SccReport,
    ordering: OrderingReport,
    critical_path: CriticalPathReport,
    /// Shortest distances from node 0, acyclic graphs only. `null` marks
    /// nodes unreachable from the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    shortest_from_zero: Option<Vec<Option<u64>>>,
}

/// Runs the full analysis sequence over each dataset file.
pub fn run(files: &[PathBuf], json: bool) -> Result<()> {
    for path in files {
        let dataset =
            load_dataset(path).with_context(|| format!("loading {}", path.display()))?;
        let report = analyze(&dataset)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_human(&report);
        }
    }
    Ok(())
}

fn analyze(dataset: &Dataset) -> Result<AnalysisReport> {
    let graph = &dataset.graph;
    let durations = &dataset.durations;
    let mut metrics = Metrics::new();

    // 1. SCC decomposition.
    let sccs = find_sccs(graph, &mut metrics);
    let scc_report = SccReport {
        count: sccs.len(),
        sizes: sccs.iter().map(|s| s.members.len()).collect(),
        metrics: metrics.snapshot(),
    };
    metrics.reset();

    // 2. Condensation and its topological order.
    let condensation = build_condensation(graph, &sccs);
    let component_order = topo_sort(&condensation, &mut metrics);
    let ordering = OrderingReport {
        condensation_nodes: condensation.len(),
        condensation_edges: condensation.edge_count(),
        component_order: component_order.order.clone(),
        task_order: derive_task_order(&component_order.order, &sccs),
        metrics: metrics.snapshot(),
    };
    metrics.reset();

    // 3. Critical path: directly when the graph is acyclic, otherwise
    // over one representative node per component.
    let original_order = topo_sort(graph, &mut metrics);
    metrics.reset();

    let (critical, used_fallback) = if original_order.complete {
        (
            find_critical_path(graph, durations, &original_order.order, &mut metrics)?,
            false,
        )
    } else {
        let projection = representative_order(&component_order.order, &sccs);
        (
            find_critical_path(graph, durations, &projection, &mut metrics)?,
            true,
        )
    };
    let critical_report = CriticalPathReport {
        used_condensation_fallback: used_fallback,
        path: critical.path,
        length: critical.length,
        metrics: metrics.snapshot(),
    };
    metrics.reset();

    // 4. Shortest distances from node 0, acyclic inputs only.
    let shortest_from_zero = if original_order.complete && !graph.is_empty() {
        let result = shortest_paths(graph, durations, &original_order.order, 0, &mut metrics)?;
        Some(
            result
                .dist
                .iter()
                .map(|&d| if d == UNREACHABLE { None } else { Some(d) })
                .collect(),
        )
    } else {
        None
    };

    Ok(AnalysisReport {
        name: dataset.name.clone(),
        nodes: graph.len(),
        edges: graph.edge_count(),
        acyclic: original_order.complete,
        sccs: scc_report,
        ordering,
        critical_path: critical_report,
        shortest_from_zero,
    })
}

fn print_human(report: &AnalysisReport) {
    println!("\n{}", "=".repeat(50));
    println!("PROCESSING: {}", report.name.to_uppercase());
    println!("{}", "=".repeat(50));
    println!("   Nodes: {}, edges: {}", report.nodes, report.edges);

    println!("\n1. STRONGLY CONNECTED COMPONENTS:");
    println!("   Found {} SCCs", report.sccs.count);
    println!("   SCC sizes: {:?}", report.sccs.sizes);
    print_metrics(&report.sccs.metrics);

    println!("\n2. CONDENSATION GRAPH & TOPOLOGICAL SORT:");
    println!("   Condensation nodes: {}", report.ordering.condensation_nodes);
    println!("   Component order: {:?}", report.ordering.component_order);
    println!("   Task order: {:?}", report.ordering.task_order);
    print_metrics(&report.ordering.metrics);

    println!("\n3. CRITICAL PATH ANALYSIS:");
    if report.critical_path.used_condensation_fallback {
        println!("   Graph has cycles, using condensation for critical path");
    }
    println!("   Critical path length: {}", report.critical_path.length);
    println!("   Critical path: {:?}", report.critical_path.path);
    print_metrics(&report.critical_path.metrics);

    if let Some(distances) = &report.shortest_from_zero {
        println!("\n4. SHORTEST PATHS FROM NODE 0:");
        let rendered: Vec<String> = distances
            .iter()
            .map(|d| match d {
                Some(d) => d.to_string(),
                None => "unreachable".to_string(),
            })
            .collect();
        println!("   Distances: [{}]", rendered.join(", "));
    }
}

fn print_metrics(snapshot: &MetricsSnapshot) {
    println!(
        "   Metrics: time={} ns, dfs_visits={}, edge_relaxations={}, queue_operations={}",
        snapshot.elapsed_ns,
        snapshot.dfs_visits,
        snapshot.edge_relaxations,
        snapshot.queue_operations
    );
}
