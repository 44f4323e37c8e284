//! Solver trace as CSV, one row per iteration.

use std::io::Write;

use csv::Writer;

use nt_equilibrium::{IterationStep, Outcome, SolverObserver};

use crate::{ReportError, ReportResult};

/// A [`SolverObserver`] writing one row per iteration:
///
/// ```csv
/// iteration,fastest,slowest,fastest_secs,slowest_secs,spread_secs,fastest_vehicles,slowest_vehicles
/// ```
///
/// Route numbers are 1-based like the text report.  Write errors are stored
/// because observer callbacks return nothing; check
/// [`take_error`][Self::take_error] after the run.
pub struct CsvTraceObserver<W: Write> {
    rows:       Writer<W>,
    last_error: Option<ReportError>,
}

impl<W: Write> CsvTraceObserver<W> {
    pub fn new(out: W) -> ReportResult<Self> {
        let mut rows = Writer::from_writer(out);
        rows.write_record([
            "iteration",
            "fastest",
            "slowest",
            "fastest_secs",
            "slowest_secs",
            "spread_secs",
            "fastest_vehicles",
            "slowest_vehicles",
        ])?;
        Ok(Self { rows, last_error: None })
    }

    /// Take the stored write error (if any) after the solver returns.
    pub fn take_error(&mut self) -> Option<ReportError> {
        self.last_error.take()
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> ReportResult<W> {
        self.rows.flush()?;
        self.rows.into_inner().map_err(|e| e.into_error().into())
    }

    fn store_err(&mut self, result: ReportResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> SolverObserver for CsvTraceObserver<W> {
    fn on_iteration(&mut self, step: &IterationStep<'_>) {
        let fastest = step.fastest;
        let slowest = step.slowest;
        let result = self
            .rows
            .write_record(&[
                step.iteration.to_string(),
                (fastest.index() + 1).to_string(),
                (slowest.index() + 1).to_string(),
                step.times[fastest.index()].to_string(),
                step.times[slowest.index()].to_string(),
                step.spread().to_string(),
                step.assignment.get(fastest).to_string(),
                step.assignment.get(slowest).to_string(),
            ])
            .map_err(ReportError::from);
        self.store_err(result);
    }

    fn on_finish(&mut self, _outcome: Outcome, _iterations: u64) {
        let result = self.rows.flush().map_err(ReportError::from);
        self.store_err(result);
    }
}
