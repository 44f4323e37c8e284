//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edges are sorted by `(from, to)`, so a node's neighbours come out in
//! ascending node order, the same order a row scan of an N×N adjacency
//! matrix would visit them.  A missing edge is simply absent; there are no
//! "infinite weight" cells and no self-loops.
//!
//! Every edge carries its own time function `F` (by default a
//! [`RoadSegment`]), evaluated with the route load each time the solver
//! asks.

use std::collections::BTreeMap;

use nt_core::{EdgeId, NodeId, RoadModelConfig};
use nt_road::{RoadResult, RoadSegment, TimeFunction};

use crate::loader::EdgeRecord;
use crate::{NetworkError, NetworkResult};

/// Largest node count accepted from input.  The CSR row pointer holds one
/// entry per node, so an unchecked id near `u32::MAX` would allocate
/// gigabytes.
pub const MAX_NODES: usize = 1 << 20;

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format with one time function per edge.
///
/// All index arrays are `pub` for direct access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork<F = RoadSegment> {
    node_count: usize,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    edge_time: Vec<F>,
}

impl<F> RoadNetwork<F> {
    /// A network with no nodes or edges.  Enumerating routes on it yields
    /// nothing.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Whether `node` is a valid index into this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count
    }

    /// Node 0, the default origin.  `None` for an empty network.
    pub fn origin(&self) -> Option<NodeId> {
        (self.node_count > 0).then_some(NodeId(0))
    }

    /// Node N−1, the default destination.  `None` for an empty network.
    pub fn destination(&self) -> Option<NodeId> {
        self.node_count.checked_sub(1).map(|n| NodeId(n as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`, in
    /// ascending order of their target node.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The edge `from -> to`, if one exists.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if !self.contains(from) {
            return None;
        }
        let start = self.node_out_start[from.index()] as usize;
        let end   = self.node_out_start[from.index() + 1] as usize;
        self.edge_to[start..end]
            .binary_search(&to)
            .ok()
            .map(|offset| EdgeId((start + offset) as u32))
    }

    /// The time function attached to `edge`.
    #[inline]
    pub fn time_fn(&self, edge: EdgeId) -> &F {
        &self.edge_time[edge.index()]
    }
}

impl<F: TimeFunction> RoadNetwork<F> {
    /// Seconds to traverse `edge` when `load` vehicles are routed over it.
    #[inline]
    pub fn edge_time(&self, edge: EdgeId, load: f64) -> RoadResult<f64> {
        self.edge_time[edge.index()].travel_time(load)
    }
}

impl RoadNetwork<RoadSegment> {
    /// Build a network from parsed edge records, evaluating every segment
    /// under `model`.  The network has at least `min_nodes` nodes, so the
    /// destination can be a node no edge reaches.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidEdge`] for a record that fails validation or
    ///   names a node at or above [`MAX_NODES`].
    /// - [`NetworkError::TooManyNodes`] if `min_nodes` exceeds [`MAX_NODES`].
    pub fn from_records(
        records:   &[EdgeRecord],
        model:     RoadModelConfig,
        min_nodes: usize,
    ) -> NetworkResult<Self> {
        if min_nodes > MAX_NODES {
            return Err(NetworkError::TooManyNodes { requested: min_nodes, max: MAX_NODES });
        }
        let mut b = RoadNetworkBuilder::new();
        b.ensure_nodes(min_nodes);
        for r in records {
            let (from, to) = (NodeId(r.from), NodeId(r.to));
            let invalid = |reason: String| NetworkError::InvalidEdge { from, to, reason };
            if from.index() >= MAX_NODES || to.index() >= MAX_NODES {
                return Err(invalid(format!("node index must be below {MAX_NODES}")));
            }
            let segment = r.to_segment(model).map_err(|e| invalid(e.to_string()))?;
            b.add_edge(from, to, segment);
        }
        Ok(b.build())
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The node count is one more than the largest node index mentioned by any
/// edge (including dropped self-loops), raised by [`ensure_nodes`](Self::ensure_nodes)
/// when the caller knows the network is larger.  Defining the same
/// `from -> to` twice keeps the later time function.
///
/// # Example
///
/// ```
/// use nt_core::NodeId;
/// use nt_network::RoadNetworkBuilder;
/// use nt_road::RoadSegment;
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_edge(NodeId(0), NodeId(1), RoadSegment::new(60.0, 2, 1_000.0).unwrap());
/// b.add_edge(NodeId(1), NodeId(2), RoadSegment::new(50.0, 1, 400.0).unwrap());
/// let net = b.build();
/// assert_eq!(net.node_count(), 3);
/// assert_eq!(net.edge_count(), 2);
/// ```
pub struct RoadNetworkBuilder<F = RoadSegment> {
    node_count: usize,
    edges:      BTreeMap<(NodeId, NodeId), F>,
}

impl<F> RoadNetworkBuilder<F> {
    pub fn new() -> Self {
        Self { node_count: 0, edges: BTreeMap::new() }
    }

    /// Guarantee at least `n` nodes even if some carry no edges.
    pub fn ensure_nodes(&mut self, n: usize) -> &mut Self {
        self.node_count = self.node_count.max(n);
        self
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// Self-loops are dropped.  A repeated `(from, to)` replaces the earlier
    /// definition.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, time: F) -> &mut Self {
        self.node_count = self.node_count.max(from.index().max(to.index()) + 1);
        if from != to {
            self.edges.insert((from, to), time);
        }
        self
    }

    pub fn node_count(&self) -> usize { self.node_count }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// The edge map is already ordered by `(from, to)`, so CSR construction
    /// is a single pass.
    pub fn build(self) -> RoadNetwork<F> {
        let node_count = self.node_count;
        let edge_count = self.edges.len();

        let mut node_out_start = vec![0u32; node_count + 1];
        let mut edge_from = Vec::with_capacity(edge_count);
        let mut edge_to   = Vec::with_capacity(edge_count);
        let mut edge_time = Vec::with_capacity(edge_count);

        for ((from, to), time) in self.edges {
            node_out_start[from.index() + 1] += 1;
            edge_from.push(from);
            edge_to.push(to);
            edge_time.push(time);
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        RoadNetwork { node_count, node_out_start, edge_from, edge_to, edge_time }
    }
}

impl<F> Default for RoadNetworkBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}
