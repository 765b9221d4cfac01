#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs HQ Defence scenarios headlessly.

mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

/// Headless HQ Defence simulation driver.
#[derive(Parser, Debug)]
#[command(name = "hq-defence")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML scenario describing the world, towers, and enemy spawns
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of frames to simulate (overrides the scenario)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Seed for weapon spread (overrides the scenario)
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the HQ Defence command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    if let Some(frames) = args.frames {
        scenario.frames = frames;
    }
    if let Some(seed) = args.seed {
        scenario.world.rng_seed = seed;
    }

    let summary = scenario.run()?;
    println!("{summary}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
