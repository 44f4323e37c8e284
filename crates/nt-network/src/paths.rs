//! Exhaustive simple-route enumeration.
//!
//! Breadth-first search over partial routes: a FIFO queue is seeded with the
//! one-node route `[origin]`; each dequeued route either ends at the
//! destination (and is recorded) or is extended by every out-neighbour not
//! already on it.  No node repeats, so every route has at most N nodes and
//! the search terminates.
//!
//! Output is discovery order: shorter routes (in edges) first, ties in
//! ascending neighbour order.  The number of simple routes grows
//! exponentially with density; this is meant for the small networks the
//! equilibrium solver handles.

use std::collections::VecDeque;
use std::fmt;

use nt_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{NetworkError, NetworkResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// A simple directed route: distinct nodes plus the edges joining them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl Path {
    fn start(origin: NodeId) -> Self {
        Self { nodes: vec![origin], edges: Vec::new() }
    }

    fn extended(&self, edge: EdgeId, next: NodeId) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(next);
        let mut edges = Vec::with_capacity(self.edges.len() + 1);
        edges.extend_from_slice(&self.edges);
        edges.push(edge);
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges to traverse in order, from origin to destination.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn origin(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// `true` if origin and destination coincide.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

impl fmt::Display for Path {
    /// `0 -> 2 -> 3`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", node.0)?;
        }
        Ok(())
    }
}

// ── Enumeration ───────────────────────────────────────────────────────────────

/// Every simple route from node 0 to node N−1.
///
/// Returns an empty `Vec` when the network is empty or the last node cannot
/// be reached; callers must handle that case.
pub fn enumerate_paths<F>(network: &RoadNetwork<F>) -> Vec<Path> {
    match (network.origin(), network.destination()) {
        (Some(origin), Some(destination)) => bfs(network, origin, destination),
        _ => Vec::new(),
    }
}

/// Every simple route from `origin` to `destination`.
///
/// # Errors
///
/// [`NetworkError::NodeNotFound`] if either endpoint is outside the network.
pub fn enumerate_paths_between<F>(
    network:     &RoadNetwork<F>,
    origin:      NodeId,
    destination: NodeId,
) -> NetworkResult<Vec<Path>> {
    for node in [origin, destination] {
        if !network.contains(node) {
            return Err(NetworkError::NodeNotFound(node));
        }
    }
    Ok(bfs(network, origin, destination))
}

fn bfs<F>(network: &RoadNetwork<F>, origin: NodeId, destination: NodeId) -> Vec<Path> {
    let mut found = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(Path::start(origin));

    while let Some(partial) = queue.pop_front() {
        let last = partial.destination();
        if last == destination {
            found.push(partial);
            continue;
        }
        for edge in network.out_edges(last) {
            let next = network.edge_to[edge.index()];
            if !partial.contains_node(next) {
                queue.push_back(partial.extended(edge, next));
            }
        }
    }

    tracing::debug!(
        routes = found.len(),
        origin = origin.0,
        destination = destination.0,
        "enumerated simple routes"
    );
    found
}
