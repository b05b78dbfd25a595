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

//! Delivery robot.
//!
//! A robot walks the roads of a small village, picking up parcels and dropping them off at their
//! addresses. Robots are interchangeable decision strategies; the simulation counts how many turns
//! a robot needs to deliver everything, and the benchmark compares two robots on identical tasks.

pub mod benchmark;
pub mod config;
pub mod error;
pub mod graph;
pub mod path;
pub mod robot;
pub mod simulation;
pub mod world;

pub use benchmark::{Benchmark, Comparison};
pub use config::{ConfigError, VillageConfig};
pub use error::RobotError;
pub use graph::{Graph, Place};
pub use path::{find_route, Route};
pub use robot::{
    route_score, Decision, FixedRoute, GreedyNearest, RandomRobot, Robot, RobotKind, ScoredGreedy,
    Strategy,
};
pub use simulation::{count_steps, run_robot, RunMode, Simulation};
pub use world::{Parcel, WorldState};

pub type Rng = rand_pcg::Pcg64;
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
pub type Result<T> = std::result::Result<T, RobotError>;
