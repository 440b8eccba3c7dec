//! `benchmark` — wall-clock cost of the tick kernel.
//!
//! Two sweeps, each point averaged over `--reps` fresh models:
//!
//! 1. one cohort of growing size (`--size-max`, step `--size-step`);
//! 2. a chain of 1..=10 cohorts of 5 000 agents, adjacent cohorts joined by
//!    100 shared agents.
//!
//! Output: `size_sweep.csv` and `group_sweep.csv` in `--out`.
//!
//! Run with:
//!   cargo run -p benchmark --profile fast

// Many short-lived models; mimalloc keeps allocation out of the timings.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use memory_stats::memory_stats;
use tracing::info;
use tracing_subscriber::EnvFilter;

use abm_core::rng::mix_seed;
use abm_sir::{ConnectionSpec, GroupParams, NoopObserver, Parameters, SirBuilder};

// ── Memory helper ─────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "benchmark")]
#[command(about = "Timing sweeps over cohort size and cohort count")]
struct Args {
    #[arg(long, default_value_t = 200_000)]
    size_max: u32,

    #[arg(long, default_value_t = 500)]
    size_step: u32,

    /// Largest number of chained cohorts
    #[arg(long, default_value_t = 10)]
    groups_max: usize,

    #[arg(long, default_value_t = 5_000)]
    group_size: u32,

    /// Repetitions averaged per point
    #[arg(short, long, default_value_t = 20)]
    reps: u32,

    #[arg(short, long, default_value_t = 364)]
    ticks: u64,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    #[arg(short, long, default_value = "output/benchmark")]
    out: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Index cases in the first cohort; not scaled with cohort size.
const SEEDS: u32 = 20;
/// Agents shared by each pair of adjacent cohorts.
const BRIDGE: u32 = 100;

// ── Model setup ───────────────────────────────────────────────────────────────

fn group_name(i: usize) -> String {
    format!("G{i}")
}

/// `count` cohorts of `size` agents in a chain, seeded in the first.
fn chain(count: usize, size: u32) -> Parameters {
    let names: Vec<String> = (0..count).map(group_name).collect();
    let groups = names.iter().map(|n| GroupParams::new(n.as_str(), 0.24, 2)).collect();

    let mut connections: Vec<ConnectionSpec> = names
        .iter()
        .enumerate()
        .map(|(i, n)| ConnectionSpec::new(&[n.as_str()], size, if i == 0 { SEEDS } else { 0 }))
        .collect();
    connections.extend(
        names
            .windows(2)
            .map(|pair| ConnectionSpec::new(&[pair[0].as_str(), pair[1].as_str()], BRIDGE, 0)),
    );

    Parameters { gamma: 0.10, groups, connections }
}

/// Mean milliseconds to run `ticks` ticks, excluding construction.
fn time_point(params: &Parameters, args: &Args, point: u64) -> Result<f64> {
    let mut mean = 0.0;
    for n in 1..=args.reps {
        let seed = mix_seed(args.seed, point * u64::from(args.reps) + u64::from(n));
        let mut model = SirBuilder::new(params.clone()).seed(seed).build()?;
        let t0 = Instant::now();
        model.run_ticks(args.ticks, &mut NoopObserver);
        let elapsed = t0.elapsed().as_secs_f64() * 1_000.0;
        mean += (elapsed - mean) / f64::from(n);
    }
    Ok(mean)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    anyhow::ensure!(args.size_step > 0, "size step must be positive");
    anyhow::ensure!(args.reps > 0, "at least one repetition is required");
    std::fs::create_dir_all(&args.out)?;

    // ── Sweep 1: one cohort of growing size ───────────────────────────────
    let mut w = csv::Writer::from_path(args.out.join("size_sweep.csv"))?;
    w.write_record(["groups", "group_size", "agents", "mean_ms"])?;
    for (point, size) in (0..=args.size_max).step_by(args.size_step as usize).enumerate() {
        let params = chain(1, size);
        let mean = time_point(&params, &args, point as u64)?;
        w.write_record(&[
            "1".to_owned(),
            size.to_string(),
            params.population_size().to_string(),
            format!("{mean:.3}"),
        ])?;
        info!(size, mean_ms = mean, mem_mb = mem_mb(), "size point");
    }
    w.flush()?;

    // ── Sweep 2: growing chain of fixed-size cohorts ──────────────────────
    let mut w = csv::Writer::from_path(args.out.join("group_sweep.csv"))?;
    w.write_record(["groups", "agents", "mean_ms"])?;
    for count in 1..=args.groups_max {
        let params = chain(count, args.group_size);
        let mean = time_point(&params, &args, count as u64)?;
        w.write_record(&[
            count.to_string(),
            params.population_size().to_string(),
            format!("{mean:.3}"),
        ])?;
        info!(groups = count, mean_ms = mean, mem_mb = mem_mb(), "group point");
    }
    w.flush()?;

    info!(out = %args.out.display(), "done");
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
