//! `nt-road` — the analytical model of a single road segment.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`velocity`]    | `effective_velocity`, `RoadState` (spacing → speed)    |
//! | [`travel_time`] | `expected_time`, `TrafficLight`, unit conversion       |
//! | [`segment`]     | `RoadSegment`, `LoadMap`, `TimeFunction` trait         |
//! | [`bpr`]         | `BprTime`, a capacity-based alternative time function  |
//! | [`error`]       | `RoadError`, `RoadResult<T>`                           |
//!
//! # Pipeline
//!
//! ```text
//! route load ──(alpha, beta)──▶ vehicles on segment
//!            ──spacing model──▶ effective speed + saturation flag
//!            ──lights, penalty──▶ expected transit time (s)
//! ```

pub mod bpr;
pub mod error;
pub mod segment;
pub mod travel_time;
pub mod velocity;


pub use bpr::BprTime;
pub use error::{RoadError, RoadResult};
pub use segment::{LoadMap, RoadSegment, TimeFunction};
pub use travel_time::{TrafficLight, expected_time, kph_to_mps};
pub use velocity::{RoadState, effective_velocity};
