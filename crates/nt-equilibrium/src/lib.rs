//! `nt-equilibrium` — distribute a fixed vehicle population over routes.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`assignment`] | `FlowAssignment` (vehicles per route, conserved total)     |
//! | [`solver`]     | `equilibrate*`, `Equilibrium`, `Outcome`                   |
//! | [`observer`]   | `SolverObserver` trait, `IterationStep`, `NoopObserver`    |
//! | [`error`]      | `EquilibriumError`, `EquilibriumResult<T>`                 |
//!
//! # Algorithm (summary)
//!
//! ```text
//! routes   = every simple route origin → destination
//! vehicles = all on the fastest empty route
//! loop:
//!     edge load  = Σ vehicles of routes using the edge
//!     route time = Σ edge time(edge load)
//!     if slowest − fastest ≤ tolerance      → Converged
//!     if iteration cap reached              → IterationLimit
//!     move one vehicle slowest loaded → fastest, or → Stalled if impossible
//! ```
//!
//! This is a hill-climbing heuristic, not an exact equilibrium solver.

pub mod assignment;
pub mod error;
pub mod observer;
pub mod solver;

#[cfg(test)]
mod tests;

pub use assignment::FlowAssignment;
pub use error::{EquilibriumError, EquilibriumResult};
pub use observer::{IterationStep, NoopObserver, SolverObserver};
pub use solver::{Equilibrium, Outcome, equilibrate, equilibrate_between, equilibrate_with_observer};
