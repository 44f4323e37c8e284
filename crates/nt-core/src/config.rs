//! Model constants and solver settings.
//!
//! Both structs are plain values passed explicitly into the road model and
//! the solver; nothing here is process-global.

use crate::{NtError, NtResult};

// ── RoadModelConfig ───────────────────────────────────────────────────────────

/// Constants of the per-road speed and travel-time model.
///
/// The defaults reproduce the calibrated model: 5 m cars, 6 m minimum
/// bumper-to-bumper gap, a free-flow gap of half a second of travel, and a
/// speed floor of 40 % of free flow.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadModelConfig {
    /// Average vehicle length in metres.
    pub car_length_m: f64,

    /// Clearance added to `car_length_m` to give the minimum safe gap.
    pub min_clearance_m: f64,

    /// Free-flow reference gap, in seconds of travel at free-flow speed.
    /// `d_f = v0 * free_flow_gap_secs`.
    pub free_flow_gap_secs: f64,

    /// Share of free-flow speed that is always available, even when the
    /// spacing regime alone would stop traffic.
    pub v_min_ratio: f64,

    /// Empirical weight of the over-saturation delay term.  Tunable; the
    /// default `0.06` equals the historical `600 / 10000`.
    pub saturation_penalty: f64,
}

impl RoadModelConfig {
    /// Minimum inter-vehicle gap `d_min` (metres).  Spacing below this is
    /// saturation.
    #[inline]
    pub fn min_gap_m(&self) -> f64 {
        self.car_length_m + self.min_clearance_m
    }

    /// Reject values that would make the model meaningless.
    pub fn validate(&self) -> NtResult<()> {
        if !(self.car_length_m.is_finite() && self.car_length_m > 0.0) {
            return Err(NtError::Config(format!(
                "car_length_m must be positive, got {}",
                self.car_length_m
            )));
        }
        if !(self.min_clearance_m.is_finite() && self.min_clearance_m >= 0.0) {
            return Err(NtError::Config(format!(
                "min_clearance_m must be non-negative, got {}",
                self.min_clearance_m
            )));
        }
        if !(self.free_flow_gap_secs.is_finite() && self.free_flow_gap_secs >= 0.0) {
            return Err(NtError::Config(format!(
                "free_flow_gap_secs must be non-negative, got {}",
                self.free_flow_gap_secs
            )));
        }
        if !(0.0..=1.0).contains(&self.v_min_ratio) {
            return Err(NtError::Config(format!(
                "v_min_ratio must lie in [0, 1], got {}",
                self.v_min_ratio
            )));
        }
        if !(self.saturation_penalty.is_finite() && self.saturation_penalty >= 0.0) {
            return Err(NtError::Config(format!(
                "saturation_penalty must be non-negative, got {}",
                self.saturation_penalty
            )));
        }
        Ok(())
    }
}

impl Default for RoadModelConfig {
    fn default() -> Self {
        Self {
            car_length_m:       5.0,
            min_clearance_m:    1.0,
            free_flow_gap_secs: 0.5,
            v_min_ratio:        0.4,
            saturation_penalty: 600.0 / 10_000.0,
        }
    }
}

// ── SolverConfig ──────────────────────────────────────────────────────────────

/// Settings for one equilibrium run.
///
/// Typically built by the application from CLI flags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Fixed vehicle population distributed across routes.
    pub total_vehicles: u32,

    /// Largest accepted gap (seconds) between the slowest and fastest route.
    pub tolerance_secs: f64,

    /// Hard cap on balancing iterations.  Single-unit transfers can
    /// oscillate between two routes; the cap turns that into a clean halt.
    pub max_iterations: u64,
}

impl SolverConfig {
    pub fn new(total_vehicles: u32, tolerance_secs: f64) -> Self {
        Self { total_vehicles, tolerance_secs, ..Self::default() }
    }

    pub fn validate(&self) -> NtResult<()> {
        if !(self.tolerance_secs.is_finite() && self.tolerance_secs >= 0.0) {
            return Err(NtError::Config(format!(
                "tolerance must be a non-negative number of seconds, got {}",
                self.tolerance_secs
            )));
        }
        if self.max_iterations == 0 {
            return Err(NtError::Config("max_iterations must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            total_vehicles: 200,
            tolerance_secs: 5.0,
            max_iterations: 1_000_000,
        }
    }
}
