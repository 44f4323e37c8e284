//! The balancing loop.
//!
//! # Selection rules
//!
//! `fastest` is the route with the smallest time; `slowest` is the route
//! with the largest time among those carrying vehicles.  Both break ties by
//! the lowest route index.  An impassable route has time `+∞`, so it is
//! never `fastest` while any route is passable, and once loaded it is always
//! the `slowest`.  An empty route, however slow, is never a source: it has no
//! vehicle to give.  With no vehicles at all `slowest` is `fastest`.
//!
//! # Termination
//!
//! Each iteration moves one vehicle or halts.  The loop halts when the
//! spread is within tolerance, when no move is possible, or at
//! `SolverConfig::max_iterations`.

use nt_core::{NodeId, PathId, SolverConfig};
use nt_network::{Path, RoadNetwork, enumerate_paths_between};
use nt_road::{RoadError, TimeFunction};

use crate::observer::{IterationStep, NoopObserver, SolverObserver};
use crate::{EquilibriumError, EquilibriumResult, FlowAssignment};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Why the solver stopped.  None of these is an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Slowest and fastest route are within tolerance.
    Converged,
    /// Outside tolerance, but no single-vehicle move is possible.
    Stalled,
    /// `max_iterations` transfers were made without converging.
    IterationLimit,
}

// ── Equilibrium ───────────────────────────────────────────────────────────────

/// Result of a solver run.  `assignment`, `times` and `paths` are
/// index-aligned by [`PathId`].
#[derive(Debug, Clone)]
pub struct Equilibrium {
    /// Routes in discovery order.
    pub paths: Vec<Path>,
    pub assignment: FlowAssignment,
    /// Seconds per route at the final assignment.  A route that carries no
    /// vehicles may be `f64::INFINITY` (impassable); a loaded route never is.
    pub times: Vec<f64>,
    pub outcome: Outcome,
    /// Number of single-vehicle transfers made.
    pub iterations: u64,
}

impl Equilibrium {
    /// Vehicles per route.
    pub fn vehicles(&self) -> &[u32] {
        self.assignment.vehicles()
    }

    pub fn is_converged(&self) -> bool {
        self.outcome == Outcome::Converged
    }

    pub fn fastest(&self) -> PathId {
        PathId(argmin(&self.times) as u32)
    }

    /// Slowest route carrying vehicles.
    pub fn slowest(&self) -> PathId {
        PathId(slowest_loaded(&self.times, self.vehicles()).unwrap_or(argmin(&self.times)) as u32)
    }

    /// Gap between the slowest loaded and the fastest route, seconds.
    pub fn spread(&self) -> f64 {
        self.times[self.slowest().index()] - self.times[self.fastest().index()]
    }

    /// Vehicle-weighted mean travel time; `None` with no vehicles.
    pub fn mean_time(&self) -> Option<f64> {
        let total = self.assignment.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .vehicles()
            .iter()
            .zip(&self.times)
            .filter(|(n, _)| **n > 0)
            .map(|(&n, &t)| n as f64 * t)
            .sum();
        Some(weighted / total as f64)
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Balance `config.total_vehicles` over every simple route from node 0 to
/// node N−1.
///
/// # Errors
///
/// - [`EquilibriumError::EmptyNetwork`] / [`EquilibriumError::NoRoute`] when
///   there is nothing to assign to.
/// - [`EquilibriumError::Gridlock`] when a route left carrying vehicles is
///   impassable.
/// - [`EquilibriumError::Config`] for an invalid `config`.
pub fn equilibrate<F: TimeFunction>(
    network: &RoadNetwork<F>,
    config:  &SolverConfig,
) -> EquilibriumResult<Equilibrium> {
    equilibrate_with_observer(network, config, &mut NoopObserver)
}

/// [`equilibrate`] with progress callbacks.
pub fn equilibrate_with_observer<F: TimeFunction, O: SolverObserver>(
    network:  &RoadNetwork<F>,
    config:   &SolverConfig,
    observer: &mut O,
) -> EquilibriumResult<Equilibrium> {
    let (Some(origin), Some(destination)) = (network.origin(), network.destination()) else {
        return Err(EquilibriumError::EmptyNetwork);
    };
    equilibrate_between(network, origin, destination, config, observer)
}

/// Balance over every simple route from `origin` to `destination`.
pub fn equilibrate_between<F: TimeFunction, O: SolverObserver>(
    network:     &RoadNetwork<F>,
    origin:      NodeId,
    destination: NodeId,
    config:      &SolverConfig,
    observer:    &mut O,
) -> EquilibriumResult<Equilibrium> {
    config.validate()?;

    let paths = enumerate_paths_between(network, origin, destination)?;
    if paths.is_empty() {
        tracing::warn!(from = origin.0, to = destination.0, "no route between endpoints");
        return Err(EquilibriumError::NoRoute { from: origin, to: destination });
    }

    solve(network, paths, config, observer)
}

// ── Balancing loop ────────────────────────────────────────────────────────────

fn solve<F: TimeFunction, O: SolverObserver>(
    network:  &RoadNetwork<F>,
    paths:    Vec<Path>,
    config:   &SolverConfig,
    observer: &mut O,
) -> EquilibriumResult<Equilibrium> {
    let total = config.total_vehicles;
    let edge_count = network.edge_count();

    // Empty network: every edge load is zero.
    let empty_times = route_times(network, &paths, &vec![0.0; edge_count])?;
    let first = argmin(&empty_times);
    if empty_times[first].is_infinite() {
        return Err(EquilibriumError::Gridlock { path: PathId(first as u32) });
    }

    let mut assignment = FlowAssignment::all_on(paths.len(), PathId(first as u32), total);
    tracing::debug!(
        routes = paths.len(),
        total,
        start_route = first,
        tolerance = config.tolerance_secs,
        "equilibrium solver started"
    );
    observer.on_start(&paths, &assignment);

    let mut iterations = 0u64;
    let (outcome, times) = loop {
        let loads = assignment.edge_loads(&paths, edge_count);
        let times = route_times(network, &paths, &loads)?;
        let fastest = argmin(&times);
        let slowest = slowest_loaded(&times, assignment.vehicles()).unwrap_or(fastest);
        let (fastest, slowest) = (PathId(fastest as u32), PathId(slowest as u32));

        let step = IterationStep {
            iteration: iterations,
            fastest,
            slowest,
            times: &times,
            assignment: &assignment,
        };
        let spread = step.spread();
        tracing::trace!(iteration = iterations, fastest = fastest.0, slowest = slowest.0, spread);
        observer.on_iteration(&step);

        if spread <= config.tolerance_secs {
            break (Outcome::Converged, times);
        }
        if iterations >= config.max_iterations {
            break (Outcome::IterationLimit, times);
        }
        if !assignment.transfer(slowest, fastest) {
            break (Outcome::Stalled, times);
        }
        iterations += 1;
    };

    observer.on_finish(outcome, iterations);

    if let Some(stuck) = assignment
        .vehicles()
        .iter()
        .zip(&times)
        .position(|(&n, t)| n > 0 && t.is_infinite())
    {
        tracing::warn!(route = stuck, "loaded route is impassable");
        return Err(EquilibriumError::Gridlock { path: PathId(stuck as u32) });
    }

    match outcome {
        Outcome::Converged => tracing::info!(iterations, "equilibrium converged"),
        _ => tracing::warn!(?outcome, iterations, "equilibrium halted outside tolerance"),
    }

    Ok(Equilibrium { paths, assignment, times, outcome, iterations })
}

/// Seconds per route given per-edge loads; `+∞` for an impassable route.
fn route_times<F: TimeFunction>(
    network: &RoadNetwork<F>,
    paths:   &[Path],
    loads:   &[f64],
) -> EquilibriumResult<Vec<f64>> {
    let mut times = Vec::with_capacity(paths.len());
    for path in paths {
        let mut secs = 0.0;
        for &edge in path.edges() {
            match network.edge_time(edge, loads[edge.index()]) {
                Ok(t) => secs += t,
                Err(RoadError::Impassable { .. }) => {
                    secs = f64::INFINITY;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        times.push(secs);
    }
    Ok(times)
}

/// Index of the smallest value, lowest index on ties.
fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v < values[best] {
            best = i;
        }
    }
    best
}

/// Index of the largest time among routes with vehicles, lowest index on
/// ties.  `None` when every route is empty.
fn slowest_loaded(times: &[f64], vehicles: &[u32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, (&t, &n)) in times.iter().zip(vehicles).enumerate() {
        if n == 0 {
            continue;
        }
        match best {
            Some(b) if t <= times[b] => {}
            _ => best = Some(i),
        }
    }
    best
}
