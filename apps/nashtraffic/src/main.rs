//! nashtraffic — balance vehicles over every route of a small road network.
//!
//! Reads directed edges (two-line text format on stdin by default), finds
//! every simple route from node 0 to the last node, and moves vehicles one
//! at a time from the slowest route to the fastest until their times agree
//! within a tolerance.
//!
//! ```text
//! nashtraffic --demo
//! nashtraffic --input roads.txt --vehicles 500 --tolerance 2
//! nashtraffic --input roads.csv --csv --format csv --output routes.csv
//! RUST_LOG=nt_equilibrium=trace nashtraffic < roads.txt
//! ```

mod demo;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use nt_core::{RoadModelConfig, SolverConfig};
use nt_equilibrium::{Equilibrium, equilibrate, equilibrate_with_observer};
use nt_network::{EdgeRecord, RoadNetwork, load_edges_reader, load_edges_text};
use nt_report::{CsvReport, CsvTraceObserver, ReportWriter, TextReport};

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Minutes and seconds per route.
    Text,
    /// One CSV row per route.
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "nashtraffic", version, about = "Wardrop equilibrium over all simple routes")]
struct Args {
    /// Edge file; stdin when omitted.
    #[arg(short, long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Input is CSV with a header row instead of the two-line text format.
    #[arg(long)]
    csv: bool,

    /// Use the built-in sample network.
    #[arg(long)]
    demo: bool,

    /// Minimum node count; raises the destination beyond the largest
    /// node named by an edge.
    #[arg(long)]
    nodes: Option<usize>,

    /// Vehicles to distribute.
    #[arg(short = 'n', long)]
    vehicles: Option<u32>,

    /// Accepted slowest-minus-fastest gap, seconds.
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Cap on single-vehicle transfers.
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Report file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write one CSV row per solver iteration to this file.
    #[arg(long)]
    trace: Option<PathBuf>,
}

impl Args {
    fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::default();
        if let Some(n) = self.vehicles {
            config.total_vehicles = n;
        }
        if let Some(t) = self.tolerance {
            config.tolerance_secs = t;
        }
        if let Some(cap) = self.max_iterations {
            config.max_iterations = cap;
        }
        config
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn read_records(args: &Args) -> Result<Vec<EdgeRecord>> {
    if args.demo {
        return demo::demo_records();
    }
    let records = match (&args.input, args.csv) {
        (Some(path), true) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            load_edges_reader(file)?
        }
        (Some(path), false) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            load_edges_text(BufReader::new(file))?
        }
        (None, true) => load_edges_reader(io::stdin().lock())?,
        (None, false) => load_edges_text(io::stdin().lock())?,
    };
    Ok(records)
}

fn build_network(args: &Args, records: &[EdgeRecord]) -> Result<RoadNetwork> {
    let min_nodes = args.nodes.unwrap_or(0);
    Ok(RoadNetwork::from_records(records, RoadModelConfig::default(), min_nodes)?)
}

// ── Solve ─────────────────────────────────────────────────────────────────────

fn solve(args: &Args, network: &RoadNetwork, config: &SolverConfig) -> Result<Equilibrium> {
    let Some(path) = &args.trace else {
        return Ok(equilibrate(network, config)?);
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut trace = CsvTraceObserver::new(file)?;
    let eq = equilibrate_with_observer(network, config, &mut trace)?;
    if let Some(e) = trace.take_error() {
        return Err(e).with_context(|| format!("writing trace {}", path.display()));
    }
    trace.into_inner()?;
    Ok(eq)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn report_sink(args: &Args) -> Result<Box<dyn Write>> {
    Ok(match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    })
}

fn write_report(args: &Args, eq: &Equilibrium) -> Result<()> {
    let sink = report_sink(args)?;
    let mut report: Box<dyn ReportWriter> = match args.format {
        Format::Text => Box::new(TextReport::new(sink)),
        Format::Csv => Box::new(CsvReport::new(sink)?),
    };
    report.write_equilibrium(eq)?;
    report.finish()?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let records = read_records(&args)?;
    let network = build_network(&args, &records)?;
    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "road network loaded"
    );

    let config = args.solver_config();
    let t0 = Instant::now();
    let eq = solve(&args, &network, &config)?;
    tracing::info!(
        routes = eq.paths.len(),
        iterations = eq.iterations,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "solver finished"
    );

    write_report(&args, &eq)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::{Args, Format, build_network, read_records};

    #[test]
    fn flags_override_solver_defaults() {
        let args = Args::parse_from(["nashtraffic", "--demo", "-n", "50", "-t", "1.5"]);
        let config = args.solver_config();
        assert_eq!(config.total_vehicles, 50);
        assert_eq!(config.tolerance_secs, 1.5);
        assert_eq!(config.max_iterations, 1_000_000);
        assert_eq!(args.format, Format::Text);
    }

    #[test]
    fn demo_conflicts_with_input() {
        assert!(Args::try_parse_from(["nashtraffic", "--demo", "--input", "x.txt"]).is_err());
    }

    #[test]
    fn reads_text_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "0 1\n60 0 0 0 1000 1 0").unwrap();
        let path = f.path().to_str().unwrap().to_owned();
        let args = Args::parse_from(["nashtraffic", "--input", path.as_str()]);
        let records = read_records(&args).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].lanes, 4);
    }

    #[test]
    fn reads_csv_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "from,to,v0,has_lights,light_on_sec,light_off_sec,length,alpha,beta").unwrap();
        writeln!(f, "0,1,60,0,0,0,1000,1,0").unwrap();
        let path = f.path().to_str().unwrap().to_owned();
        let args = Args::parse_from(["nashtraffic", "--input", path.as_str(), "--csv"]);
        assert_eq!(read_records(&args).unwrap().len(), 1);
    }

    #[test]
    fn nodes_flag_moves_destination() {
        let args = Args::parse_from(["nashtraffic", "--demo", "--nodes", "6"]);
        let records = read_records(&args).unwrap();
        let net = build_network(&args, &records).unwrap();
        assert_eq!(net.node_count(), 6);
        assert_eq!(net.edge_count(), 5);
    }

    #[test]
    fn oversized_node_count_rejected() {
        let args = Args::parse_from(["nashtraffic", "--demo", "--nodes", "100000000"]);
        let records = read_records(&args).unwrap();
        assert!(build_network(&args, &records).is_err());
    }
}
