#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Dogfight match.

mod scenario;
mod simulation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dogfight_world::query;

use crate::{scenario::Scenario, simulation::Simulation};

/// Runs a headless Dogfight match between AI-controlled ships.
#[derive(Debug, Parser)]
#[command(name = "dogfight", version, about, long_about = None)]
struct Cli {
    /// Scenario file to load instead of the built-in crossroads arena.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Overrides the scenario's random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Prints the final board with ship positions.
    #[arg(long)]
    render: bool,
}

/// Entry point for the Dogfight command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut scenario = Scenario::load(cli.scenario.as_deref())?;
    if let Some(seed) = cli.seed {
        scenario.arena.seed = seed;
    }

    let mut simulation = Simulation::new(&scenario)?;
    println!("{}", query::welcome_banner(simulation.world()));
    simulation.run(cli.ticks);

    let report = simulation.report();
    for (ship, tick) in &report.destroyed {
        println!("ship {} destroyed at tick {tick}", ship.get());
    }
    println!(
        "{} ticks, {} shots, {} hits",
        report.ticks, report.shots, report.hits
    );

    let world = simulation.world();
    for ship in query::active_ships(world) {
        let health = query::ship_health(world, ship).unwrap_or_default();
        match query::ship_tile(world, ship) {
            Some(tile) => println!(
                "ship {} survives at ({}, {}) with {health} health",
                ship.get(),
                tile.column(),
                tile.row()
            ),
            None => println!("ship {} survives with {health} health", ship.get()),
        }
    }

    if cli.render {
        print!("{}", simulation.render());
    }
    Ok(())
}
