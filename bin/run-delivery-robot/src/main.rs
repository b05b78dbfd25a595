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
use delivery_robot::{run_robot, Robot, RobotKind, Route, VillageConfig, WorldState};
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Run one delivery robot on a random task, printing every move.
#[derive(Parser, Debug)]
#[command(name = "run-delivery-robot")]
struct Args {
    /// Robot to run: random, route, goal or scored.
    #[arg(long, default_value = "scored")]
    robot: RobotKind,

    /// Random seed for the task and for the random robot.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Village description as JSON. Defaults to the built-in village.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => VillageConfig::from_path(path)?,
        None => VillageConfig::default(),
    };
    let graph = config.graph()?;
    let robot = Robot::from_kind(args.robot, config.itinerary())?;

    let mut rng = rand_pcg::Pcg64::seed_from_u64(args.seed);
    let state = WorldState::random(&graph, &config.start_place(), config.parcels, &mut rng)?;
    println!("{}", state);

    let turns = run_robot(&graph, state, &robot, Route::new(), &mut rng)?;
    println!(
        "{} robot delivered everything in {} turns",
        robot.kind(),
        turns
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_robot_names_parse() {
        let args =
            Args::try_parse_from(["run-delivery-robot", "--robot", "goal", "--seed", "7"]).unwrap();
        assert_eq!(args.robot, RobotKind::GreedyNearest);
        assert_eq!(args.seed, 7);
        assert!(Args::try_parse_from(["run-delivery-robot", "--robot", "teleport"]).is_err());
    }
}
