//! beach: run the synthetic coastline scenario and write CSV reports.
//!
//! ```text
//! beach [config.json] [output-dir]
//! ```
//!
//! The optional JSON file holds a partial `SimConfig`; missing fields take
//! their defaults.  Set `RUST_LOG=debug` for setup and per-minute progress.

mod scenario;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_core::{Phase, SimConfig};
use ev_output::{CsvWriter, SimOutputObserver};
use ev_sim::SimBuilder;

const DEFAULT_OUTPUT_DIR: &str = "output/beach";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig {
            adults:                  800,
            children:                200,
            snapshot_interval_ticks: 60,
            ..SimConfig::default()
        });
    };
    let file = File::open(path).with_context(|| format!("opening config {path}"))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().as_deref())?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_owned()));

    println!("=== beach: rust_evac tsunami evacuation ===");
    println!(
        "Movers: {} adults + {} children  |  Cap: {} min  |  Seed: {}",
        config.adults, config.children, config.max_minutes, config.seed
    );

    let mut sim = SimBuilder::new(config, scenario::regions()?)
        .beach_markers(scenario::beach_markers())
        .road_markers(scenario::road_markers())
        .build()?;
    info!(
        routed = sim.routing.routed,
        shortcut = sim.routing.shortcut,
        unrouted = sim.routing.unrouted,
        "population routed"
    );

    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(&out_dir)?);
    obs.record_initial(&sim.counts());

    let t0 = Instant::now();
    let report = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        return Err(e).with_context(|| format!("writing reports to {}", out_dir.display()));
    }

    println!();
    println!("Finished ({}) after {} simulated, {:.3} s wall", report.termination, report.time_label(), elapsed.as_secs_f64());
    println!("{:<18} {:>8}", "Phase", "Movers");
    println!("{}", "-".repeat(27));
    for phase in Phase::ALL {
        println!("{:<18} {:>8}", phase.as_str(), report.counts.get(phase));
    }
    println!();
    println!("Reports written to {}", out_dir.display());

    Ok(())
}
