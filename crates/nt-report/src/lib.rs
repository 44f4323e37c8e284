//! `nt-report` — presenting equilibrium results.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`writer`]   | `ReportWriter` trait implemented by every backend          |
//! | [`text`]     | `TextReport` (console minutes/seconds), `format_duration`  |
//! | [`csv`]      | `CsvReport` (one row per route)                            |
//! | [`observer`] | `CsvTraceObserver` (one row per solver iteration)          |
//! | [`error`]    | `ReportError`, `ReportResult<T>`                           |
//!
//! # Example
//!
//! ```rust,ignore
//! let eq = equilibrate(&network, &config)?;
//! let mut report = TextReport::new(std::io::stdout().lock());
//! report.write_equilibrium(&eq)?;
//! report.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod text;
pub mod writer;


pub use crate::csv::CsvReport;
pub use error::{ReportError, ReportResult};
pub use observer::CsvTraceObserver;
pub use text::{TextReport, format_duration};
pub use writer::ReportWriter;
