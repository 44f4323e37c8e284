//! Console report.
//!
//! ```text
//! route :  1 // cars : 101, time :   4m 2.412000s  [0 -> 1 -> 3]
//! route :  2 // cars :  99, time :   3m 57.612000s  [0 -> 2 -> 3]
//! route :  3 // cars : 0  [0 -> 1 -> 2 -> 3]
//! average time :   4m 0.036000s
//! outcome : converged after 99 transfers, spread 4.800000s
//! ```
//!
//! Routes are numbered from 1.  Empty routes show no time.

use std::io::Write;

use nt_equilibrium::{Equilibrium, Outcome};

use crate::{ReportResult, ReportWriter};

/// Split seconds into `"{m:3}m {s:3.6}s"`, or `"impassable"` when infinite.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() {
        return "impassable".to_string();
    }
    let minutes = (secs / 60.0).floor();
    let rest = secs - minutes * 60.0;
    format!("{:3}m {:3.6}s", minutes as i64, rest)
}

/// Writes the human-readable report to any `Write` sink.
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TextReport<W> {
    fn write_equilibrium(&mut self, eq: &Equilibrium) -> ReportResult<()> {
        for (i, ((path, &vehicles), &secs)) in
            eq.paths.iter().zip(eq.vehicles()).zip(&eq.times).enumerate()
        {
            if vehicles == 0 {
                writeln!(self.out, "route : {:2} // cars : 0  [{path}]", i + 1)?;
            } else {
                writeln!(
                    self.out,
                    "route : {:2} // cars : {:3}, time : {}  [{path}]",
                    i + 1,
                    vehicles,
                    format_duration(secs)
                )?;
            }
        }

        match eq.mean_time() {
            Some(mean) => writeln!(self.out, "average time : {}", format_duration(mean))?,
            None => writeln!(self.out, "average time : n/a (no vehicles)")?,
        }

        let outcome = match eq.outcome {
            Outcome::Converged => "converged",
            Outcome::Stalled => "stalled",
            Outcome::IterationLimit => "iteration limit reached",
        };
        let spread = eq.spread();
        if spread.is_finite() {
            writeln!(
                self.out,
                "outcome : {outcome} after {} transfers, spread {spread:.6}s",
                eq.iterations
            )?;
        } else {
            writeln!(self.out, "outcome : {outcome} after {} transfers, spread unbounded", eq.iterations)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
