//! Solver observer trait for progress reporting and iteration tracing.

use nt_core::PathId;
use nt_network::Path;

use crate::{FlowAssignment, Outcome};

/// State of one balancing iteration, after route times were recomputed and
/// before any vehicle moves.
pub struct IterationStep<'a> {
    /// Number of transfers made so far.
    pub iteration: u64,
    pub fastest: PathId,
    /// Slowest route carrying vehicles.
    pub slowest: PathId,
    /// Seconds per route; `f64::INFINITY` for an impassable route.
    pub times: &'a [f64],
    pub assignment: &'a FlowAssignment,
}

impl IterationStep<'_> {
    /// Gap between the slowest and fastest route, seconds.
    pub fn spread(&self) -> f64 {
        self.times[self.slowest.index()] - self.times[self.fastest.index()]
    }
}

/// Callbacks invoked by the solver at key points of a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SolverObserver {
    /// Called once the routes are known and every vehicle sits on the
    /// fastest empty route.
    fn on_start(&mut self, _paths: &[Path], _assignment: &FlowAssignment) {}

    /// Called every iteration, including the final one that halts.
    fn on_iteration(&mut self, _step: &IterationStep<'_>) {}

    /// Called once after the loop halts.
    fn on_finish(&mut self, _outcome: Outcome, _iterations: u64) {}
}

/// A [`SolverObserver`] that does nothing.
pub struct NoopObserver;

impl SolverObserver for NoopObserver {}
