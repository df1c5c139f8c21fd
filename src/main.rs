use anyhow::Result;
use clap::Parser;
use env_logger::Builder;
use flock_common::SimulationConfig;
use flock_engine::output::{final_positions_path, write_final_positions, write_snapshots};
use flock_engine::{FlockSimulation, SnapshotDetail};
use log::{debug, error, info, trace, warn, LevelFilter};
use std::path::PathBuf;
use std::time::Instant;

/// Headless flocking run: steps the flock and records snapshots for offline renderers.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override run.total_ticks from the config
    #[arg(long)]
    ticks: Option<u32>,

    /// Override run.seed from the config
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Flock Engine...");

    // --- Load Configuration ---
    let config = SimulationConfig::load(&args.config)?;
    info!("Loaded configuration from {}", args.config.display());

    let total_ticks = args.ticks.unwrap_or(config.run.total_ticks);
    let seed = args.seed.or(config.run.seed);
    let mut record_interval = config.run.record_interval_ticks;
    if record_interval == 0 {
        warn!("record_interval_ticks is 0. Recording every tick.");
        record_interval = 1;
    }
    let detail = SnapshotDetail::from_output_config(&config.output);

    // --- Initialize Simulation ---
    let params = config.get_sim_params();
    debug!("Simulation Parameters: {:#?}", params);
    let mut sim = FlockSimulation::new(params, seed)?;
    match seed {
        Some(seed) => info!("Placement seed: {}", seed),
        None => info!("No seed configured; placement is not reproducible."),
    }

    info!(
        "Running {} ticks, recording every {} ticks.",
        total_ticks, record_interval
    );
    let start_time = Instant::now();
    let mut previous_print_time = start_time;
    let print_interval_secs = 5.0;

    sim.record_snapshot(detail);

    for tick in 1..=total_ticks {
        let step_start_time = Instant::now();
        sim.step();
        let step_duration = step_start_time.elapsed();

        let is_record_tick = tick % record_interval == 0;
        let is_last_tick = tick == total_ticks;
        let should_print_status =
            previous_print_time.elapsed().as_secs_f64() >= print_interval_secs;

        if is_record_tick || is_last_tick {
            sim.record_snapshot(detail);
        }

        if should_print_status || is_record_tick || is_last_tick {
            let mean_speed = sim.mean_speed();
            info!(
                "Tick [{}/{}] | Boids: {} | Mean speed: {:.2} | Step Time: {:6.3} ms | Elapsed: {:.2} s",
                tick,
                total_ticks,
                sim.boid_count(),
                mean_speed,
                step_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = Instant::now();
        } else {
            trace!(
                "Tick [{}/{}] completed in {:.3} ms",
                tick,
                total_ticks,
                step_duration.as_secs_f64() * 1000.0
            );
        }
    }

    info!(
        "Run finished in {:.3} seconds.",
        start_time.elapsed().as_secs_f64()
    );

    // --- Save Recorded Data ---
    if config.output.save_stats {
        if let Err(e) = write_snapshots(sim.recorded_snapshots(), &config.output) {
            error!("Error saving snapshots: {:#}", e);
            anyhow::bail!("Failed to save snapshots.");
        }
    } else {
        info!("Skipping saving snapshots as per config (save_stats is false).");
    }

    if config.output.save_positions {
        let path = final_positions_path(&config.output);
        if let Err(e) = write_final_positions(&sim.final_positions(), &path) {
            error!("Error saving final positions: {:#}", e);
            anyhow::bail!("Failed to save final positions.");
        }
    } else {
        info!("Skipping saving final positions as per config.");
    }

    info!("Flock run complete.");
    Ok(())
}
