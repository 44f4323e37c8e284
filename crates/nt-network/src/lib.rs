//! `nt-network` — road network, route enumeration, and edge loading.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR), `RoadNetworkBuilder`                 |
//! | [`paths`]   | `Path`, `enumerate_paths`, `enumerate_paths_between`      |
//! | [`loader`]  | `EdgeRecord`, `load_edges_text`, `load_edges_csv`         |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                        |

pub mod error;
pub mod loader;
pub mod network;
pub mod paths;


pub use error::{NetworkError, NetworkResult};
pub use loader::{EdgeRecord, load_edges_csv, load_edges_reader, load_edges_text};
pub use network::{MAX_NODES, RoadNetwork, RoadNetworkBuilder};
pub use paths::{Path, enumerate_paths, enumerate_paths_between};
