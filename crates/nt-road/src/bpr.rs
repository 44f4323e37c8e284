//! Bureau of Public Roads volume-delay function.
//!
//! `t(load) = t0 · (1 + (load / capacity)²)`.  Smooth, strictly increasing,
//! and never impassable, which makes it a convenient stand-in for
//! [`crate::RoadSegment`] when only the shape of congestion matters.

use crate::{RoadError, RoadResult, TimeFunction};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BprTime {
    /// Travel time on an empty road, seconds.
    pub free_flow_secs: f64,
    /// Load at which travel time doubles.
    pub capacity: f64,
}

impl BprTime {
    pub fn new(free_flow_secs: f64, capacity: f64) -> RoadResult<Self> {
        if !(free_flow_secs.is_finite() && free_flow_secs > 0.0) {
            return Err(RoadError::InvalidSegment(format!(
                "free-flow time must be positive, got {free_flow_secs}"
            )));
        }
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(RoadError::InvalidSegment(format!(
                "capacity must be positive, got {capacity}"
            )));
        }
        Ok(Self { free_flow_secs, capacity })
    }
}

impl TimeFunction for BprTime {
    fn travel_time(&self, load: f64) -> RoadResult<f64> {
        let congestion = (load.max(0.0) / self.capacity).powi(2);
        Ok(self.free_flow_secs * (1.0 + congestion))
    }
}
