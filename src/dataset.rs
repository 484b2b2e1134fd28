//! Synthetic dataset generation: random task graphs with per-node
//! durations, for exercising the analysis pipeline.
//!
//! Generation is fully deterministic for a given seed. Randomness comes
//! from an embedded splitmix64 generator rather than an external RNG
//! crate: reproducible fixtures are the actual requirement here, and
//! splitmix64 is a well-known single-u64-state generator (Vigna, 2015)
//! that keeps the dataset files stable across platforms.

use crate::graph::{NodeId, TaskGraph};

/// Seed used for the standard datasets.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for one synthetic dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSpec {
    pub name: String,
    /// Node count.
    pub nodes: usize,
    /// Probability of including each ordered pair `i -> j`, `i != j`.
    pub density: f64,
    /// Whether explicit cycles are planted on top of the random edges.
    pub allow_cycles: bool,
    /// Number of planted cycles (ignored unless `allow_cycles`).
    pub cycles: usize,
}

impl DatasetSpec {
    pub fn new(name: &str, nodes: usize, density: f64, allow_cycles: bool, cycles: usize) -> Self {
        Self {
            name: name.to_string(),
            nodes,
            density,
            allow_cycles,
            cycles,
        }
    }
}

/// A generated (or loaded) dataset: the graph plus aligned durations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub density: f64,
    pub allow_cycles: bool,
    pub graph: TaskGraph,
    pub durations: Vec<u64>,
}

/// The nine standard presets: small/medium/large crossed with
/// acyclic/cyclic/mixed.
pub fn standard_specs() -> Vec<DatasetSpec> {
    vec![
        DatasetSpec::new("small_acyclic", 8, 0.3, false, 1),
        DatasetSpec::new("small_cyclic", 10, 0.4, true, 2),
        DatasetSpec::new("small_mixed", 9, 0.35, true, 1),
        DatasetSpec::new("medium_acyclic", 15, 0.3, false, 1),
        DatasetSpec::new("medium_cyclic", 20, 0.4, true, 3),
        DatasetSpec::new("medium_mixed", 18, 0.35, true, 2),
        DatasetSpec::new("large_acyclic", 35, 0.25, false, 1),
        DatasetSpec::new("large_cyclic", 50, 0.3, true, 5),
        DatasetSpec::new("large_mixed", 45, 0.28, true, 3),
    ]
}

/// Generates a dataset from `spec`, deterministically for a given `seed`.
///
/// Edges: every ordered pair `i -> j` with `i != j` is included with
/// probability `density`, in ascending `(i, j)` scan order. When cycles
/// are requested and the graph has at least 3 nodes, each planted cycle
/// links 3–5 distinct shuffled nodes in a ring, skipping edges that
/// already exist. Durations are uniform in `1..=10`.
pub fn generate(spec: &DatasetSpec, seed: u64) -> Dataset {
    let mut rng = SplitMix64::new(seed);
    let mut graph = TaskGraph::new(spec.nodes);

    for i in 0..spec.nodes {
        for j in 0..spec.nodes {
            if i != j && rng.next_f64() < spec.density {
                graph.add_edge(i, j);
            }
        }
    }

    if spec.allow_cycles && spec.nodes >= 3 {
        plant_cycles(&mut graph, spec.nodes, spec.cycles, &mut rng);
    }

    let durations = (0..spec.nodes)
        .map(|_| rng.next_range(10) as u64 + 1)
        .collect();

    Dataset {
        name: spec.name.clone(),
        density: spec.density,
        allow_cycles: spec.allow_cycles,
        graph,
        durations,
    }
}

fn plant_cycles(graph: &mut TaskGraph, nodes: usize, cycles: usize, rng: &mut SplitMix64) {
    for _ in 0..cycles {
        let cycle_len = (rng.next_range(3) as usize + 3).min(nodes);
        if cycle_len < 2 {
            continue;
        }

        let mut cycle_nodes: Vec<NodeId> = Vec::with_capacity(cycle_len);
        while cycle_nodes.len() < cycle_len {
            let candidate = rng.next_range(nodes as u64) as NodeId;
            if !cycle_nodes.contains(&candidate) {
                cycle_nodes.push(candidate);
            }
        }
        rng.shuffle(&mut cycle_nodes);

        for i in 0..cycle_nodes.len() {
            let from = cycle_nodes[i];
            let to = cycle_nodes[(i + 1) % cycle_nodes.len()];
            if !graph.has_edge(from, to) {
                graph.add_edge(from, to);
            }
        }
    }
}

/// splitmix64: one u64 of state, full 64-bit output per step.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform value in `0..bound`. Modulo bias is negligible for the
    /// tiny bounds used here.
    fn next_range(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    /// Value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Fisher–Yates shuffle.
    fn shuffle(&mut self, items: &mut [NodeId]) {
        for i in (1..items.len()).rev() {
            let j = self.next_range(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }
}
