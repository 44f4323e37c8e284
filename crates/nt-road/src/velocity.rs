//! Spacing-based speed model.
//!
//! The average gap between vehicles decides one of three regimes:
//!
//! | Gap `d`             | Regime speed                                      |
//! |---------------------|---------------------------------------------------|
//! | `d < d_min`         | 0 (saturated)                                     |
//! | `d_min <= d < d_f`  | `v0 · sin(π/2 · (d − d_min) / (d_f − d_min))`     |
//! | `d >= d_f`          | `v0`                                              |
//!
//! The returned speed never drops below `v0 · v_min_ratio`; only the
//! `saturated` flag reports gridlock spacing.

use std::f64::consts::FRAC_PI_2;

use nt_core::RoadModelConfig;

/// Speed of traffic on a segment and whether its spacing is saturated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoadState {
    /// Effective speed, same unit as the free-flow speed passed in.
    pub speed: f64,
    /// `true` iff the average gap is below the minimum safe gap.
    pub saturated: bool,
}

/// Free-flow reference gap `d_f` for free-flow speed `v0` (m/s).
#[inline]
pub fn free_flow_gap(config: &RoadModelConfig, v0: f64) -> f64 {
    v0 * config.free_flow_gap_secs
}

/// Average gap between consecutive vehicles on a segment.
///
/// With at most one vehicle there is no gap to speak of and the free-flow
/// reference gap is returned.
pub fn inter_vehicle_gap(
    config:   &RoadModelConfig,
    v0:       f64,
    lanes:    u32,
    vehicles: f64,
    length_m: f64,
) -> f64 {
    if vehicles > 1.0 {
        (length_m - (vehicles / lanes as f64) * config.car_length_m) / (vehicles - 1.0)
    } else {
        free_flow_gap(config, v0)
    }
}

/// Speed for a known average gap `gap_m`.
pub fn velocity_at_gap(config: &RoadModelConfig, v0: f64, gap_m: f64) -> RoadState {
    let d_min = config.min_gap_m();
    let d_f = free_flow_gap(config, v0);

    let (regime, saturated) = if gap_m < d_min {
        (0.0, true)
    } else if gap_m < d_f {
        (v0 * (FRAC_PI_2 * (gap_m - d_min) / (d_f - d_min)).sin(), false)
    } else {
        (v0, false)
    };

    RoadState {
        speed: v0 * config.v_min_ratio + regime * (1.0 - config.v_min_ratio),
        saturated,
    }
}

/// Effective speed on a straight road of `length_m` with `lanes` lanes
/// carrying `vehicles` vehicles at free-flow speed `v0` (m/s).
pub fn effective_velocity(
    config:   &RoadModelConfig,
    v0:       f64,
    lanes:    u32,
    vehicles: f64,
    length_m: f64,
) -> RoadState {
    let gap = inter_vehicle_gap(config, v0, lanes, vehicles, length_m);
    velocity_at_gap(config, v0, gap)
}
