//! Road-model error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoadError {
    /// Effective speed is zero: the segment cannot be crossed at this load.
    #[error("segment impassable with {vehicles} vehicles on it")]
    Impassable { vehicles: f64 },

    #[error("invalid road segment: {0}")]
    InvalidSegment(String),
}

pub type RoadResult<T> = Result<T, RoadError>;
