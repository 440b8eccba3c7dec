//! `scenario` — run a cohort network described in a TOML file.
//!
//! ```toml
//! gamma = 0.10
//!
//! [run]
//! total_ticks = 364
//! seed = 5489
//!
//! [[groups]]
//! name = "A"
//! beta = 0.24
//! contact_factor = 2
//!
//! [[connections]]
//! groups = ["A"]
//! members = 9990
//! seed_infected = 10
//! ```
//!
//! Writes `tick_counts.csv` and `group_counts.csv` to the output directory
//! and logs the infection peak of every cohort.
//!
//! Run with:
//!   cargo run -p scenario --release -- demos/scenario/scenarios/network.toml

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use abm_cohort::GroupState;
use abm_core::{RunConfig, Tick};
use abm_output::{CsvWriter, OutputWriter, SimOutputObserver};
use abm_sir::{Counts, Parameters, PeakTracker, SirBuilder, SirObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "scenario")]
#[command(about = "Run an SIR scenario loaded from a TOML file")]
struct Args {
    /// Scenario file
    path: PathBuf,

    /// Override `run.total_ticks`
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Override `run.seed`
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory (defaults to `output/<file stem>`)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Everything a scenario file may contain.
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    run: RunConfig,
    #[serde(flatten)]
    parameters: Parameters,
}

fn load(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Writes output and tracks peaks in one pass.
struct ScenarioObserver<W: OutputWriter> {
    output: SimOutputObserver<W>,
    peaks:  PeakTracker,
}

impl<W: OutputWriter> SirObserver for ScenarioObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, counts: Counts, groups: &[GroupState]) {
        self.peaks.on_tick_end(tick, counts, groups);
        self.output.on_tick_end(tick, counts, groups);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.output.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let Scenario { mut run, parameters } = load(&args.path)?;
    if let Some(ticks) = args.ticks {
        run.total_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        run.seed = seed;
    }
    let out = args.out.clone().unwrap_or_else(|| {
        let stem = args.path.file_stem().unwrap_or_default();
        Path::new("output").join(stem)
    });

    let t0 = Instant::now();
    let mut model = SirBuilder::new(parameters).config(&run).build()?;
    info!(
        population = model.population().len(),
        cohorts = model.ledger().len(),
        edges = model.ledger().edge_count(),
        build_ms = t0.elapsed().as_millis() as u64,
        "scenario loaded"
    );

    let mut observer = ScenarioObserver {
        output: SimOutputObserver::new(CsvWriter::new(&out)?, model.group_names()),
        peaks:  PeakTracker::new(),
    };

    let t0 = Instant::now();
    model.run(&run, &mut observer);
    if let Some(e) = observer.output.take_error() {
        return Err(e).context("writing output");
    }
    let c = model.counts();
    info!(
        ticks = run.total_ticks,
        run_ms = t0.elapsed().as_millis() as u64,
        s = c.susceptible,
        i = c.infected,
        r = c.recovered,
        "run finished"
    );

    for (name, peak) in model.group_names().zip(observer.peaks.groups()) {
        info!(group = name, peak_infected = peak.infected, peak_tick = peak.tick.0, "peak");
    }
    let total = observer.peaks.total();
    info!(peak_infected = total.infected, peak_tick = total.tick.0, out = %out.display(), "done");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
