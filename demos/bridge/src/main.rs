//! `bridge` — how the size of a shared block delays the second epidemic.
//!
//! Two cohorts A and B split a population of 10 000.  The index cases are in
//! A; `Br` bridge agents belong to both.  For each (A_N, Br) pair the model
//! is run once per seed and the tick at which each cohort's infected count
//! peaks is averaged over the runs.
//!
//! Output on stdout, grouped by A_N:
//!   `br,a_n,b_n,a_peak_tick,b_peak_tick`
//!
//! Run with:
//!   cargo run -p bridge --release -- --runs 8 > peaks.csv

use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use abm_sir::{ConnectionSpec, GroupParams, Parameters, PeakTracker, run_batch, seeds_from};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "bridge")]
#[command(about = "Peak-time sweep over bridge size for two cohorts")]
struct Args {
    /// Total agents across A, B and the bridge (seeds excluded)
    #[arg(long, default_value_t = 10_000)]
    population: u32,

    /// Index cases seeded in A
    #[arg(long, default_value_t = 20)]
    seeds: u32,

    /// Largest A_N; the sweep steps down by `--a-step`
    #[arg(long, default_value_t = 9_500)]
    a_max: u32,

    #[arg(long, default_value_t = 500)]
    a_step: u32,

    /// First bridge size
    #[arg(long, default_value_t = 5)]
    br_min: u32,

    #[arg(long, default_value_t = 1_000)]
    br_max: u32,

    #[arg(long, default_value_t = 100)]
    br_step: u32,

    #[arg(short, long, default_value_t = 364)]
    ticks: u64,

    /// Stochastic runs averaged per point
    #[arg(short, long, default_value_t = 8)]
    runs: usize,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

// ── Model setup ───────────────────────────────────────────────────────────────

/// A holds `a_n` agents plus the seeds, B the rest; `br` agents join both.
fn two_cohorts(a_n: u32, b_n: u32, br: u32, seeds: u32) -> Parameters {
    Parameters {
        gamma:  0.10,
        groups: vec![GroupParams::new("A", 0.24, 2), GroupParams::new("B", 0.24, 2)],
        connections: vec![
            ConnectionSpec::new(&["A"], a_n, seeds),
            ConnectionSpec::new(&["B"], b_n, 0),
            ConnectionSpec::new(&["A", "B"], br, 0),
        ],
    }
}

fn mean_peak_tick(peaks: &[PeakTracker], group: usize) -> f64 {
    if peaks.is_empty() {
        return 0.0;
    }
    let sum: u64 = peaks
        .iter()
        .filter_map(|p| p.group(group))
        .map(|p| p.tick.0)
        .sum();
    sum as f64 / peaks.len() as f64
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    anyhow::ensure!(args.a_step > 0 && args.br_step > 0, "sweep steps must be positive");
    anyhow::ensure!(args.a_max <= args.population, "a_max exceeds the population");

    let seeds = seeds_from(args.seed, args.runs);
    let stdout = io::stdout();
    let mut out = csv::Writer::from_writer(stdout.lock());
    out.write_record(["br", "a_n", "b_n", "a_peak_tick", "b_peak_tick"])?;

    let t0 = Instant::now();
    let mut a_n = args.a_max;
    let mut iterations = 0;
    while a_n > 0 {
        let b_n = args.population - a_n;
        for br in (args.br_min..=args.br_max).step_by(args.br_step as usize) {
            info!(br, a_n, b_n, "running");
            let params = two_cohorts(a_n, b_n, br, args.seeds);
            let peaks = run_batch(&params, &seeds, args.ticks, |_| PeakTracker::new())?;
            out.write_record(&[
                br.to_string(),
                a_n.to_string(),
                b_n.to_string(),
                format!("{:.2}", mean_peak_tick(&peaks, 0)),
                format!("{:.2}", mean_peak_tick(&peaks, 1)),
            ])?;
        }
        out.flush()?;

        iterations += 1;
        info!(iterations, elapsed_s = t0.elapsed().as_secs(), "finished iteration");
        a_n = a_n.saturating_sub(args.a_step);
    }

    out.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
