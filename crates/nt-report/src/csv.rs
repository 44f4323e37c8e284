//! CSV report backend.
//!
//! One row per route:
//!
//! ```csv
//! route,nodes,vehicles,time_secs
//! 1,0 1 3,101,242.412
//! ```
//!
//! `nodes` is space separated; an impassable route's time is `inf`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use nt_equilibrium::Equilibrium;

use crate::{ReportResult, ReportWriter};

/// Writes route results as CSV.
pub struct CsvReport<W: Write> {
    rows:     Writer<W>,
    finished: bool,
}

impl CsvReport<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> ReportResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvReport<W> {
    /// Wrap `out` and write the header row.
    pub fn new(out: W) -> ReportResult<Self> {
        let mut rows = Writer::from_writer(out);
        rows.write_record(["route", "nodes", "vehicles", "time_secs"])?;
        Ok(Self { rows, finished: false })
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> ReportResult<W> {
        self.rows.flush()?;
        self.rows.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> ReportWriter for CsvReport<W> {
    fn write_equilibrium(&mut self, eq: &Equilibrium) -> ReportResult<()> {
        for (i, ((path, &vehicles), &secs)) in
            eq.paths.iter().zip(eq.vehicles()).zip(&eq.times).enumerate()
        {
            let nodes: Vec<String> = path.nodes().iter().map(|n| n.0.to_string()).collect();
            self.rows.write_record(&[
                (i + 1).to_string(),
                nodes.join(" "),
                vehicles.to_string(),
                secs.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
