use nt_core::{NodeId, NtError, PathId};
use nt_network::NetworkError;
use nt_road::RoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EquilibriumError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("network has no nodes")]
    EmptyNetwork,

    /// A route that must carry vehicles cannot be crossed at its load.
    #[error("route {path} is impassable at its assigned load")]
    Gridlock { path: PathId },

    #[error("solver configuration error: {0}")]
    Config(#[from] NtError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("road model error: {0}")]
    Road(#[from] RoadError),
}

pub type EquilibriumResult<T> = Result<T, EquilibriumError>;
