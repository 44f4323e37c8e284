//! `nt-core` — foundational types for the `nash_traffic` workspace.
//!
//! Every other `nt-*` crate depends on this one.  It has no `nt-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module     | Contents                                      |
//! |------------|-----------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`, `PathId`                  |
//! | [`config`] | `RoadModelConfig`, `SolverConfig`             |
//! | [`error`]  | `NtError`, `NtResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and configs.     |

pub mod config;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RoadModelConfig, SolverConfig};
pub use error::{NtError, NtResult};
pub use ids::{EdgeId, NodeId, PathId};
