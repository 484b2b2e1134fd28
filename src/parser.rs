//! Dataset persistence: the JSON format produced by the generator and
//! consumed by the analyze driver.
//!
//! The on-disk shape is a single object with the graph and durations as
//! string-keyed maps (node ids as decimal strings):
//!
//! ```json
//! {
//!   "name": "small_cyclic",
//!   "nodes": 10,
//!   "density": 0.4,
//!   "allowCycles": true,
//!   "graph":     { "0": [1, 2], "1": [], ... },
//!   "durations": { "0": 5, "1": 2, ... }
//! }
//! ```
//!
//! Loading converts the maps into a validated [`TaskGraph`] and an
//! id-aligned duration array, so a sparse id range or an out-of-range
//! edge is a parse error rather than a corrupt analysis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::dataset::Dataset;
use crate::graph::{GraphError, NodeId, TaskGraph};

/// Errors raised while loading or saving a dataset file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Malformed(#[from] GraphError),
    #[error("key {0:?} is not a node id")]
    BadKey(String),
    #[error("\"nodes\" says {declared} but the graph map has {actual} entries")]
    NodeCountMismatch { declared: usize, actual: usize },
    #[error("durations cover {got} nodes but the graph has {expected}")]
    DurationCountMismatch { got: usize, expected: usize },
    #[error("duration for node {0} is missing")]
    MissingDuration(NodeId),
}

/// On-disk shape of a dataset.
#[derive(Debug, Serialize, Deserialize)]
struct DatasetFile {
    name: String,
    nodes: usize,
    density: f64,
    #[serde(rename = "allowCycles")]
    allow_cycles: bool,
    graph: BTreeMap<String, Vec<NodeId>>,
    durations: BTreeMap<String, u64>,
}

fn parse_key(key: &str) -> Result<NodeId, ParseError> {
    key.parse::<NodeId>()
        .map_err(|_| ParseError::BadKey(key.to_string()))
}

/// Loads and validates a dataset from `path`.
pub fn load_dataset(path: &Path) -> Result<Dataset, ParseError> {
    let text = fs::read_to_string(path)?;
    let file: DatasetFile = serde_json::from_str(&text)?;

    if file.nodes != file.graph.len() {
        return Err(ParseError::NodeCountMismatch {
            declared: file.nodes,
            actual: file.graph.len(),
        });
    }

    let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for (key, successors) in &file.graph {
        adjacency.insert(parse_key(key)?, successors.clone());
    }
    let graph = TaskGraph::from_map(&adjacency)?;

    if file.durations.len() != graph.len() {
        return Err(ParseError::DurationCountMismatch {
            got: file.durations.len(),
            expected: graph.len(),
        });
    }
    let mut by_id: BTreeMap<NodeId, u64> = BTreeMap::new();
    for (key, &duration) in &file.durations {
        by_id.insert(parse_key(key)?, duration);
    }
    let durations = (0..graph.len())
        .map(|id| by_id.get(&id).copied().ok_or(ParseError::MissingDuration(id)))
        .collect::<Result<Vec<u64>, _>>()?;

    Ok(Dataset {
        name: file.name,
        density: file.density,
        allow_cycles: file.allow_cycles,
        graph,
        durations,
    })
}

/// Writes `dataset` to `path` as pretty-printed JSON.
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<(), ParseError> {
    let graph: BTreeMap<String, Vec<NodeId>> = dataset
        .graph
        .adjacency()
        .iter()
        .enumerate()
        .map(|(id, succs)| (id.to_string(), succs.clone()))
        .collect();
    let durations: BTreeMap<String, u64> = dataset
        .durations
        .iter()
        .enumerate()
        .map(|(id, &d)| (id.to_string(), d))
        .collect();

    let file = DatasetFile {
        name: dataset.name.clone(),
        nodes: dataset.graph.len(),
        density: dataset.density,
        allow_cycles: dataset.allow_cycles,
        graph,
        durations,
    };

    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}
