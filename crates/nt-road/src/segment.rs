//! Road segments as time functions.
//!
//! The solver only ever asks one question of an edge: "how long does it take
//! at this route load?".  [`TimeFunction`] is that question; [`RoadSegment`]
//! answers it with the analytical road model, [`crate::BprTime`] with the
//! BPR capacity curve.

use nt_core::RoadModelConfig;

use crate::travel_time::{TrafficLight, expected_time};
use crate::{RoadError, RoadResult};

// ── TimeFunction ──────────────────────────────────────────────────────────────

/// Travel time of an edge as a function of the route load routed over it.
///
/// Implementations must be pure: the same `load` always gives the same
/// result, so callers may cache by load.
pub trait TimeFunction {
    /// Seconds to traverse the edge when `load` vehicles are routed over it.
    ///
    /// Returns [`RoadError::Impassable`] instead of an infinite or NaN time.
    fn travel_time(&self, load: f64) -> RoadResult<f64>;
}

// ── LoadMap ───────────────────────────────────────────────────────────────────

/// Linear map from route load to vehicles physically on a segment:
/// `vehicles = alpha * load + beta`.
///
/// `beta` models background traffic that is not part of the assignment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadMap {
    pub alpha: f64,
    pub beta: f64,
}

impl LoadMap {
    pub const IDENTITY: LoadMap = LoadMap { alpha: 1.0, beta: 0.0 };

    #[inline]
    pub fn vehicles(&self, load: f64) -> f64 {
        self.alpha * load + self.beta
    }
}

impl Default for LoadMap {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── RoadSegment ───────────────────────────────────────────────────────────────

/// One directed road, fixed at construction and only ever queried.
///
/// # Example
///
/// ```
/// use nt_road::{LoadMap, RoadSegment, TimeFunction, TrafficLight};
///
/// let seg = RoadSegment::new(60.0, 4, 1_000.0)
///     .unwrap()
///     .with_light(TrafficLight::new(30.0, 60.0))
///     .with_load_map(LoadMap { alpha: 1.0, beta: 20.0 });
/// assert!(seg.travel_time(50.0).unwrap() > 60.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSegment {
    v0_kph:   f64,
    lanes:    u32,
    length_m: f64,
    light:    TrafficLight,
    load_map: LoadMap,
    model:    RoadModelConfig,
}

impl RoadSegment {
    /// A segment without lights, identity load map and default model
    /// constants.
    ///
    /// A free-flow speed of 0 is accepted and yields an impassable road.
    pub fn new(v0_kph: f64, lanes: u32, length_m: f64) -> RoadResult<Self> {
        if !(v0_kph.is_finite() && v0_kph >= 0.0) {
            return Err(RoadError::InvalidSegment(format!(
                "free-flow speed must be a non-negative number, got {v0_kph}"
            )));
        }
        if lanes == 0 {
            return Err(RoadError::InvalidSegment("a road needs at least one lane".into()));
        }
        if !(length_m.is_finite() && length_m > 0.0) {
            return Err(RoadError::InvalidSegment(format!(
                "length must be positive, got {length_m}"
            )));
        }
        Ok(Self {
            v0_kph,
            lanes,
            length_m,
            light:    TrafficLight::NONE,
            load_map: LoadMap::IDENTITY,
            model:    RoadModelConfig::default(),
        })
    }

    pub fn with_light(mut self, light: TrafficLight) -> Self {
        self.light = light;
        self
    }

    pub fn with_load_map(mut self, load_map: LoadMap) -> Self {
        self.load_map = load_map;
        self
    }

    pub fn with_model(mut self, model: RoadModelConfig) -> Self {
        self.model = model;
        self
    }

    pub fn v0_kph(&self) -> f64 { self.v0_kph }
    pub fn lanes(&self) -> u32 { self.lanes }
    pub fn length_m(&self) -> f64 { self.length_m }
    pub fn light(&self) -> &TrafficLight { &self.light }
    pub fn load_map(&self) -> &LoadMap { &self.load_map }
    pub fn model(&self) -> &RoadModelConfig { &self.model }

    /// Travel time with `vehicles` physically on the segment, bypassing the
    /// load map.
    pub fn time_for_vehicles(&self, vehicles: f64) -> RoadResult<f64> {
        expected_time(&self.model, self.v0_kph, self.lanes, vehicles, self.length_m, &self.light)
    }
}

impl TimeFunction for RoadSegment {
    fn travel_time(&self, load: f64) -> RoadResult<f64> {
        self.time_for_vehicles(self.load_map.vehicles(load))
    }
}
