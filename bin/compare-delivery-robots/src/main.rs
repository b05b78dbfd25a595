/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use std::path::PathBuf;

use clap::Parser;
use delivery_robot::{Benchmark, Robot, RobotKind, Route, VillageConfig};
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

// Shows the benchmark summary unless RUST_LOG says otherwise.
const DEFAULT_LOG_FILTER: &str = "info";

/// Compare the mean number of turns two delivery robots need on the same random tasks.
#[derive(Parser, Debug)]
#[command(name = "compare-delivery-robots")]
struct Args {
    /// First robot: random, route, goal or scored.
    #[arg(long, default_value = "route")]
    first: RobotKind,

    /// Second robot.
    #[arg(long, default_value = "scored")]
    second: RobotKind,

    /// Number of tasks both robots run.
    #[arg(long, default_value_t = Benchmark::DEFAULT_TRIALS)]
    trials: usize,

    /// Random seed for reproducibility.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Run trials on all cores.
    #[arg(long)]
    parallel: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Village description as JSON. Defaults to the built-in village.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => VillageConfig::from_path(path)?,
        None => VillageConfig::default(),
    };
    let graph = config.graph()?;
    let first = Robot::from_kind(args.first, config.itinerary())?;
    let second = Robot::from_kind(args.second, config.itinerary())?;

    let benchmark = Benchmark::from_config(&graph, &config).with_trials(args.trials);
    let mut rng = rand_pcg::Pcg64::seed_from_u64(args.seed);
    let comparison = if args.parallel {
        benchmark.compare_parallel(&first, Route::new(), &second, Route::new(), &mut rng)?
    } else {
        benchmark.compare(&first, Route::new(), &second, Route::new(), &mut rng)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{}: {:.2} turns", first.kind(), comparison.mean_a);
        println!("{}: {:.2} turns", second.kind(), comparison.mean_b);
    }
    Ok(())
}
