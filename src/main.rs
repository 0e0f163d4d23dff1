//! Boids headless driver
//!
//! Stands in for the window/input/render loop: feeds the simulation elapsed
//! times, issues periodic resets, and writes snapshots as JSON lines.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use boids::consts::REFERENCE_DT;
use boids::sim::{Boid, FlockSummary, Simulation, SimulationConfig, UpdateMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boids flocking simulation", long_about = None)]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of boids
    #[arg(short = 'n', long, conflicts_with = "scenario")]
    count: Option<usize>,

    /// JSON array of initial boids (`{"pos": [x, y], "vel": [x, y]}`); sets the count
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Update mode override: sequential or simultaneous
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<UpdateMode>,

    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Elapsed seconds per tick
    #[arg(long, default_value_t = REFERENCE_DT)]
    dt: f32,

    /// Uniform +/- jitter added to each elapsed time
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,

    /// Randomize the flock every N ticks (0 = never)
    #[arg(long, default_value_t = 0)]
    reset_every: u64,

    /// Write a snapshot line to stdout every N ticks (0 = never)
    #[arg(long, default_value_t = 0)]
    snapshot_every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_mode(s: &str) -> Result<UpdateMode, String> {
    UpdateMode::from_name(s).ok_or_else(|| format!("unknown update mode '{s}'"))
}

/// One line of snapshot output
#[derive(Serialize)]
struct Frame<'a> {
    tick: u64,
    elapsed_seconds: f64,
    summary: FlockSummary,
    boids: &'a [Boid],
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(mode) = args.mode {
        config.update_mode = mode;
    }
    Ok(config)
}

fn parse_scenario(json: &str) -> Result<Vec<Boid>> {
    let boids: Vec<Boid> =
        serde_json::from_str(json).context("Scenario must be a JSON array of boids")?;
    Ok(boids)
}

fn load_scenario(path: &Path) -> Result<Vec<Boid>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    let boids = parse_scenario(&json)?;
    log::info!("Loaded {} boids from {}", boids.len(), path.display());
    Ok(boids)
}

fn write_frame(out: &mut impl Write, sim: &Simulation) -> Result<()> {
    let frame = Frame {
        tick: sim.time_ticks(),
        elapsed_seconds: sim.elapsed_seconds(),
        summary: sim.summary(),
        boids: sim.boids(),
    };
    serde_json::to_writer(&mut *out, &frame).context("Failed to serialize snapshot")?;
    writeln!(out)?;
    Ok(())
}

fn run(args: Args) -> Result<()> {
    if !args.dt.is_finite() || args.dt < 0.0 {
        anyhow::bail!("--dt must be a non-negative number, got {}", args.dt);
    }
    if !args.jitter.is_finite() || args.jitter < 0.0 {
        anyhow::bail!("--jitter must be a non-negative number, got {}", args.jitter);
    }

    let mut config = build_config(&args)?;
    let seed = args.seed.unwrap_or_else(time_seed);
    let mut sim = match &args.scenario {
        Some(path) => {
            let boids = load_scenario(path)?;
            config.count = boids.len();
            Simulation::with_boids(config, seed, boids).context("Invalid scenario")?
        }
        None => Simulation::new(config, seed).context("Invalid simulation config")?,
    };

    // Separate stream so jitter does not perturb the flock's own RNG
    let mut jitter_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    log::info!(
        "Running {} ticks at dt={}s (jitter {}s), seed {}",
        args.ticks,
        args.dt,
        args.jitter,
        seed
    );

    for i in 1..=args.ticks {
        if args.reset_every > 0 && i % args.reset_every == 0 {
            sim.randomize();
            log::info!("Reset at tick {}", i);
        }

        let dt = if args.jitter > 0.0 {
            (args.dt + jitter_rng.random_range(-args.jitter..=args.jitter)).max(0.0)
        } else {
            args.dt
        };
        sim.tick(dt);

        if args.snapshot_every > 0 && i % args.snapshot_every == 0 {
            write_frame(&mut out, &sim)?;
        }

        if i % 60 == 0 {
            let summary = sim.summary();
            log::debug!(
                "tick {}: centroid ({:.1}, {:.1}), speed mean {:.2} min {:.2} max {:.2}",
                i,
                summary.centroid.x,
                summary.centroid.y,
                summary.mean_speed,
                summary.min_speed,
                summary.max_speed
            );
        }
    }

    out.flush()?;

    let summary = sim.summary();
    log::info!(
        "Done: {} boids after {} ticks ({:.2}s simulated), mean speed {:.2}",
        summary.count,
        sim.time_ticks(),
        sim.elapsed_seconds(),
        summary.mean_speed
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::info!("Boids (headless) starting...");

    run(args)
}
