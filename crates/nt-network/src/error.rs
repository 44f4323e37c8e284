//! Network-subsystem error type.

use thiserror::Error;

use nt_core::NodeId;

/// Errors produced by `nt-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge { from: NodeId, to: NodeId, reason: String },

    #[error("network of {requested} nodes exceeds the limit of {max}")]
    TooManyNodes { requested: usize, max: usize },

    #[error("edge parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
