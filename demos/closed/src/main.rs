//! `closed` — one well-mixed cohort, stochastic runs against the ODE.
//!
//! Integrates the mean-field SIR equations with RK4 (100 steps per tick),
//! then runs the agent model once per seed on Rayon's pool.  Writes:
//!
//! | File               | Rows                                            |
//! |--------------------|-------------------------------------------------|
//! | `ode.csv`          | `tick,susceptible,infected,recovered` (real)    |
//! | `runs.csv`         | `run,tick,susceptible,infected,recovered`       |
//! | `mean.csv`         | `tick,susceptible,infected,recovered` (mean)    |
//! | `tick_counts.csv`  | first run, via `abm-output`                     |
//! | `group_counts.csv` | first run, via `abm-output`                     |
//!
//! Run with:
//!   cargo run -p closed --release -- --runs 100

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use abm_core::RunConfig;
use abm_ode::{SirOde, integrate};
use abm_output::{CsvWriter, SimOutputObserver};
use abm_sir::{Counts, CountsRecorder, Parameters, SirBuilder, run_batch, seeds_from};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "closed")]
#[command(about = "Closed-cohort SIR: agent-based runs compared with the ODE")]
struct Args {
    /// Susceptible agents at t = 0
    #[arg(long, default_value_t = 9_990)]
    members: u32,

    /// Infected agents at t = 0
    #[arg(long, default_value_t = 10)]
    seeds: u32,

    /// Recovery rate per tick
    #[arg(long, default_value_t = 0.10)]
    gamma: f64,

    /// Transmission rate per tick
    #[arg(long, default_value_t = 0.24)]
    beta: f64,

    #[arg(long, default_value_t = 2)]
    contact_factor: u32,

    #[arg(short, long, default_value_t = 364)]
    ticks: u64,

    /// Number of stochastic runs
    #[arg(short, long, default_value_t = 100)]
    runs: usize,

    /// Base seed; per-run seeds are derived from it
    #[arg(short, long, default_value_t = 5489)]
    seed: u64,

    /// Output directory
    #[arg(short, long, default_value = "output/closed")]
    out: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// RK4 sub-steps per tick.
const STEPS_PER_TICK: usize = 100;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let params = Parameters::single_cohort(
        args.gamma,
        args.beta,
        args.contact_factor,
        args.members,
        args.seeds,
    );
    params.validate()?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    info!(
        n = params.population_size(),
        seeds = args.seeds,
        gamma = args.gamma,
        beta = args.beta,
        ticks = args.ticks,
        "closed cohort"
    );

    // ── ODE reference ─────────────────────────────────────────────────────
    let t0 = Instant::now();
    write_ode(&args, &params)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "ode written");

    // ── Representative run through the observer bridge ───────────────────
    let config = RunConfig { total_ticks: args.ticks, seed: args.seed };
    let mut model = SirBuilder::new(params.clone()).config(&config).build()?;
    let mut observer = SimOutputObserver::new(CsvWriter::new(&args.out)?, model.group_names());
    model.run(&config, &mut observer);
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing first run");
    }
    info!(final_counts = ?model.counts(), "first run written");

    // ── Monte-Carlo batch ─────────────────────────────────────────────────
    let t0 = Instant::now();
    let seeds = seeds_from(args.seed, args.runs);
    let runs = run_batch(&params, &seeds, args.ticks, |_| CountsRecorder::new())?;
    info!(
        runs = runs.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "batch finished"
    );

    write_runs(&args.out.join("runs.csv"), &runs)?;
    write_mean(&args.out.join("mean.csv"), &runs, args.ticks as usize)?;

    let burned_out = runs
        .iter()
        .filter(|r| r.counts.last().is_some_and(|c| c.infected == 0))
        .count();
    info!(burned_out, of = runs.len(), out = %args.out.display(), "done");
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

// ── Writers ───────────────────────────────────────────────────────────────────

fn write_ode(args: &Args, params: &Parameters) -> Result<()> {
    let n = params.population_size() as f64;
    let ode = SirOde::new(n, args.beta, args.gamma)?;
    let dt = 1.0 / STEPS_PER_TICK as f64;
    let steps = args.ticks as usize * STEPS_PER_TICK;

    let mut w = csv::Writer::from_path(args.out.join("ode.csv"))?;
    w.write_record(["tick", "susceptible", "infected", "recovered"])?;

    let mut step = 0usize;
    let mut result = Ok(());
    integrate(&ode, ode.initial(f64::from(args.seeds)), dt, steps, |_, x| {
        if step % STEPS_PER_TICK == 0 && result.is_ok() {
            let tick = step / STEPS_PER_TICK;
            result = w.write_record(&[
                tick.to_string(),
                format!("{:.3}", x.s),
                format!("{:.3}", x.i),
                format!("{:.3}", x.r),
            ]);
        }
        step += 1;
    })?;
    result?;
    w.flush()?;
    Ok(())
}

fn write_runs(path: &Path, runs: &[CountsRecorder]) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["run", "tick", "susceptible", "infected", "recovered"])?;
    for (run, recorder) in runs.iter().enumerate() {
        for (tick, c) in recorder.counts.iter().enumerate() {
            w.write_record(&[
                run.to_string(),
                tick.to_string(),
                c.susceptible.to_string(),
                c.infected.to_string(),
                c.recovered.to_string(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

fn write_mean(path: &Path, runs: &[CountsRecorder], ticks: usize) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["tick", "susceptible", "infected", "recovered"])?;
    if runs.is_empty() {
        w.flush()?;
        return Ok(());
    }

    let k = runs.len() as f64;
    for tick in 0..ticks {
        let (s, i, r) = runs
            .iter()
            .filter_map(|run| run.counts.get(tick))
            .fold((0.0, 0.0, 0.0), |(s, i, r), c: &Counts| {
                (s + c.susceptible as f64, i + c.infected as f64, r + c.recovered as f64)
            });
        w.write_record(&[
            tick.to_string(),
            format!("{:.3}", s / k),
            format!("{:.3}", i / k),
            format!("{:.3}", r / k),
        ])?;
    }
    w.flush()?;
    Ok(())
}
