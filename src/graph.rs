//! Task-dependency graph representation.
//!
//! A [`TaskGraph`] is a directed graph over a dense range of node ids
//! `0..n`, stored as an adjacency list: `adj[u]` holds the successors of
//! `u` in insertion order. Adjacency order is significant — it determines
//! DFS visitation order in SCC detection and tie-breaks in critical-path
//! relaxation — so it is never sorted.
//!
//! Every algorithm sizes its working arrays from the node count, so
//! density is a hard precondition: every id in `0..n` must exist and
//! every edge must stay in range. [`TaskGraph::from_map`] validates both
//! and fails fast instead of letting a sparse id range corrupt later
//! indexing.

use std::collections::BTreeMap;
use thiserror::Error;

/// A node identifier. Using usize for efficiency; callers map their own IDs.
pub type NodeId = usize;

/// Errors raised when constructing a graph from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The adjacency map skips an id inside the dense range.
    #[error("malformed graph: node {missing} has no adjacency entry (ids must cover 0..{nodes})")]
    MissingNode { missing: NodeId, nodes: usize },
    /// An edge points at an id outside the dense range.
    #[error("malformed graph: edge {from} -> {to} references a node outside 0..{nodes}")]
    EdgeOutOfRange {
        from: NodeId,
        to: NodeId,
        nodes: usize,
    },
}

/// A directed graph over node ids `0..n` with ordered successor lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskGraph {
    adj: Vec<Vec<NodeId>>,
}

impl TaskGraph {
    /// Creates a graph with `nodes` nodes and no edges.
    pub fn new(nodes: usize) -> Self {
        Self {
            adj: vec![Vec::new(); nodes],
        }
    }

    /// Builds a graph from an id → successors mapping.
    ///
    /// The node count is the number of keys. Validates the density
    /// invariant (every id in `0..n` is a key) and that every successor
    /// id is in range; returns a [`GraphError`] otherwise.
    pub fn from_map(map: &BTreeMap<NodeId, Vec<NodeId>>) -> Result<Self, GraphError> {
        let nodes = map.len();
        let mut adj = vec![Vec::new(); nodes];

        for id in 0..nodes {
            let successors = map
                .get(&id)
                .ok_or(GraphError::MissingNode { missing: id, nodes })?;
            for &to in successors {
                if to >= nodes {
                    return Err(GraphError::EdgeOutOfRange {
                        from: id,
                        to,
                        nodes,
                    });
                }
            }
            adj[id] = successors.clone();
        }

        Ok(Self { adj })
    }

    /// Adds a directed edge `from -> to`.
    ///
    /// Both ids must be less than [`len`](Self::len); this is the trusted
    /// builder path (generator, condensation). Untrusted input goes
    /// through [`from_map`](Self::from_map).
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        debug_assert!(to < self.adj.len());
        self.adj[from].push(to);
    }

    /// Whether the edge `from -> to` already exists. O(out-degree of `from`).
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.adj[from].contains(&to)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    /// Successors of `node`, in adjacency order.
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.adj[node]
    }

    /// The full adjacency list.
    pub fn adjacency(&self) -> &[Vec<NodeId>] {
        &self.adj
    }

    /// Iterates over all edges as `(from, to)` pairs, in adjacency order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(from, succs)| succs.iter().map(move |&to| (from, to)))
    }
}
