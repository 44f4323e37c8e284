//! Expected transit time of a segment.
//!
//! # Traffic lights
//!
//! A light with red phase `off` and green phase `on` has red ratio
//! `r = off / (on + off)`.  The expected wait is folded into the segment as
//! extra distance `off · r / 2 · speed`.
//!
//! # Saturation
//!
//! Once spacing is saturated every vehicle beyond the saturation threshold
//! adds `penalty / lanes / speed` seconds, where the threshold is
//! `floor((length + d_min) / (d_min + car_length / lanes))`.

use nt_core::RoadModelConfig;

use crate::velocity::effective_velocity;
use crate::{RoadError, RoadResult};

/// km/h → m/s.
#[inline]
pub fn kph_to_mps(kph: f64) -> f64 {
    kph / 3.6
}

// ── TrafficLight ──────────────────────────────────────────────────────────────

/// Traffic-light cycle at the end of a segment.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficLight {
    /// Whether a light is present at all.  When `false` the phases are kept
    /// but contribute no delay.
    pub enabled: bool,
    /// Green phase length in seconds.
    pub on_secs: f64,
    /// Red phase length in seconds.
    pub off_secs: f64,
}

impl TrafficLight {
    /// No light.
    pub const NONE: TrafficLight = TrafficLight { enabled: false, on_secs: 0.0, off_secs: 0.0 };

    pub fn new(on_secs: f64, off_secs: f64) -> Self {
        Self { enabled: true, on_secs, off_secs }
    }

    /// Share of the cycle spent on red; 0 for an empty cycle.
    pub fn red_ratio(&self) -> f64 {
        let cycle = self.on_secs + self.off_secs;
        if cycle != 0.0 { self.off_secs / cycle } else { 0.0 }
    }

    /// Distance-equivalent of the expected wait when driving at `speed`.
    pub fn delay_distance(&self, speed: f64) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        self.off_secs * self.red_ratio() / 2.0 * speed
    }
}

// ── expected_time ─────────────────────────────────────────────────────────────

/// Smallest vehicle count at which a segment's spacing saturates.
pub fn saturation_threshold(config: &RoadModelConfig, lanes: u32, length_m: f64) -> f64 {
    let d_min = config.min_gap_m();
    ((length_m + d_min) / (d_min + config.car_length_m / lanes as f64)).floor()
}

/// Expected seconds to cross a segment.
///
/// `v0_kph` is the free-flow speed in km/h; `length_m` in metres.
///
/// # Errors
///
/// [`RoadError::Impassable`] when the effective speed is zero, which with
/// the default speed floor only happens for a zero free-flow speed.
pub fn expected_time(
    config:   &RoadModelConfig,
    v0_kph:   f64,
    lanes:    u32,
    vehicles: f64,
    length_m: f64,
    light:    &TrafficLight,
) -> RoadResult<f64> {
    let v0 = kph_to_mps(v0_kph);
    let state = effective_velocity(config, v0, lanes, vehicles, length_m);
    let speed = state.speed;

    if !(speed > 0.0 && speed.is_finite()) {
        return Err(RoadError::Impassable { vehicles });
    }

    let effective_length = length_m + light.delay_distance(speed);
    let mut secs = effective_length / speed;

    if state.saturated {
        let excess = vehicles - saturation_threshold(config, lanes, length_m);
        secs += excess / lanes as f64 * config.saturation_penalty / speed;
    }

    if !secs.is_finite() {
        return Err(RoadError::Impassable { vehicles });
    }
    Ok(secs)
}
