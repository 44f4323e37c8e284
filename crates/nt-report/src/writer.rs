//! The `ReportWriter` trait implemented by all report backends.

use nt_equilibrium::Equilibrium;

use crate::ReportResult;

/// Trait implemented by the text and CSV reports.
pub trait ReportWriter {
    /// Write the per-route result of one solver run.
    fn write_equilibrium(&mut self, eq: &Equilibrium) -> ReportResult<()>;

    /// Flush the underlying sink.
    ///
    /// Calling it again is a no-op.
    fn finish(&mut self) -> ReportResult<()>;
}
