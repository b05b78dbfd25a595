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

use rand::{Rng as _, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::VillageConfig;
use crate::graph::{Graph, Place};
use crate::robot::Strategy;
use crate::simulation::count_steps;
use crate::world::WorldState;
use crate::{Result, Rng, RobotError};

/// Mean number of turns each robot needed across all trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub mean_a: f64,
    pub mean_b: f64,
}

// One task plus the seeds each robot's random source starts from.
#[derive(Debug, Clone)]
struct Trial {
    state: WorldState,
    seed_a: u64,
    seed_b: u64,
}

/// Runs two robots head to head on the same randomly generated tasks.
///
/// Every trial draws its task and both robots' seeds from the caller's random source before any
/// robot runs. Sequential and parallel comparisons with the same seed therefore return the same
/// means.
#[derive(Debug, Clone)]
pub struct Benchmark<'a> {
    graph: &'a Graph,
    start: Place,
    parcels: usize,
    trials: usize,
}

impl<'a> Benchmark<'a> {
    pub const DEFAULT_TRIALS: usize = 100;

    pub fn new(graph: &'a Graph, start: Place, parcels: usize) -> Self {
        Self {
            graph,
            start,
            parcels,
            trials: Self::DEFAULT_TRIALS,
        }
    }

    pub fn from_config(graph: &'a Graph, config: &VillageConfig) -> Self {
        Self::new(graph, config.start_place(), config.parcels)
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn compare<A, B>(
        &self,
        a: &A,
        memory_a: A::Memory,
        b: &B,
        memory_b: B::Memory,
        rng: &mut Rng,
    ) -> Result<Comparison>
    where
        A: Strategy,
        B: Strategy,
    {
        let steps = self
            .draw_trials(rng)?
            .iter()
            .map(|trial| self.run_trial(trial, a, memory_a.clone(), b, memory_b.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.summarize(&steps))
    }

    /// Same as [`Benchmark::compare`], running trials on the rayon thread pool.
    pub fn compare_parallel<A, B>(
        &self,
        a: &A,
        memory_a: A::Memory,
        b: &B,
        memory_b: B::Memory,
        rng: &mut Rng,
    ) -> Result<Comparison>
    where
        A: Strategy + Sync,
        B: Strategy + Sync,
        A::Memory: Send + Sync,
        B::Memory: Send + Sync,
    {
        let steps = self
            .draw_trials(rng)?
            .par_iter()
            .map(|trial| self.run_trial(trial, a, memory_a.clone(), b, memory_b.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.summarize(&steps))
    }

    fn draw_trials(&self, rng: &mut Rng) -> Result<Vec<Trial>> {
        if self.trials == 0 {
            return Err(RobotError::InvalidConfig(
                "at least one trial is required".to_string(),
            ));
        }
        (0..self.trials)
            .map(|_| {
                Ok(Trial {
                    state: WorldState::random(self.graph, &self.start, self.parcels, rng)?,
                    seed_a: rng.gen(),
                    seed_b: rng.gen(),
                })
            })
            .collect()
    }

    fn run_trial<A, B>(
        &self,
        trial: &Trial,
        a: &A,
        memory_a: A::Memory,
        b: &B,
        memory_b: B::Memory,
    ) -> Result<(usize, usize)>
    where
        A: Strategy,
        B: Strategy,
    {
        let steps_a = count_steps(
            self.graph,
            trial.state.clone(),
            a,
            memory_a,
            &mut Rng::seed_from_u64(trial.seed_a),
        )?;
        let steps_b = count_steps(
            self.graph,
            trial.state.clone(),
            b,
            memory_b,
            &mut Rng::seed_from_u64(trial.seed_b),
        )?;
        Ok((steps_a, steps_b))
    }

    fn summarize(&self, steps: &[(usize, usize)]) -> Comparison {
        let trials = steps.len() as f64;
        let total_a: usize = steps.iter().map(|(a, _)| a).sum();
        let total_b: usize = steps.iter().map(|(_, b)| b).sum();
        let comparison = Comparison {
            mean_a: total_a as f64 / trials,
            mean_b: total_b as f64 / trials,
        };
        info!(
            trials = steps.len(),
            mean_a = comparison.mean_a,
            mean_b = comparison.mean_b,
            "benchmark finished"
        );
        comparison
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::path::Route;
    use crate::robot::{GreedyNearest, RandomRobot, Robot, RobotKind, ScoredGreedy};

    #[test]
    fn test_compare_is_reproducible() {
        let config = VillageConfig::default();
        let graph = config.graph().unwrap();
        let benchmark = Benchmark::from_config(&graph, &config);
        let route_robot = config.route_robot().unwrap();

        let run = || {
            benchmark
                .compare(
                    &route_robot,
                    Route::new(),
                    &RandomRobot,
                    (),
                    &mut Rng::seed_from_u64(42),
                )
                .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = VillageConfig::default();
        let graph = config.graph().unwrap();
        let benchmark = Benchmark::from_config(&graph, &config).with_trials(40);

        let sequential = benchmark
            .compare(
                &RandomRobot,
                (),
                &ScoredGreedy,
                Route::new(),
                &mut Rng::seed_from_u64(5),
            )
            .unwrap();
        let parallel = benchmark
            .compare_parallel(
                &RandomRobot,
                (),
                &ScoredGreedy,
                Route::new(),
                &mut Rng::seed_from_u64(5),
            )
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_same_robot_on_both_sides_ties() {
        let config = VillageConfig::default();
        let graph = config.graph().unwrap();
        let benchmark = Benchmark::from_config(&graph, &config).with_trials(25);
        let comparison = benchmark
            .compare(
                &GreedyNearest,
                Route::new(),
                &GreedyNearest,
                Route::new(),
                &mut Rng::seed_from_u64(11),
            )
            .unwrap();
        assert_abs_diff_eq!(comparison.mean_a, comparison.mean_b);
    }

    #[test]
    fn test_planning_beats_wandering() {
        let config = VillageConfig::default();
        let graph = config.graph().unwrap();
        let benchmark = Benchmark::from_config(&graph, &config);
        let random = Robot::from_kind(RobotKind::Random, config.itinerary()).unwrap();
        let scored = Robot::from_kind(RobotKind::ScoredGreedy, config.itinerary()).unwrap();
        let comparison = benchmark
            .compare(
                &random,
                Route::new(),
                &scored,
                Route::new(),
                &mut Rng::seed_from_u64(42),
            )
            .unwrap();
        assert!(
            comparison.mean_b < comparison.mean_a,
            "comparison: {:?}",
            comparison
        );
    }

    #[test]
    fn test_single_parcel_next_door() {
        let graph = Graph::build(["Home-Shop"]).unwrap();
        let benchmark = Benchmark::new(&graph, Place::from("Home"), 1).with_trials(10);
        let comparison = benchmark
            .compare(
                &GreedyNearest,
                Route::new(),
                &ScoredGreedy,
                Route::new(),
                &mut Rng::seed_from_u64(1),
            )
            .unwrap();
        // Either Home -> Shop (1 turn), or Shop -> Home (walk over, carry back: 2 turns).
        assert!(comparison.mean_a >= 1.0 && comparison.mean_a <= 2.0);
        assert_abs_diff_eq!(comparison.mean_a, comparison.mean_b);
    }

    #[test]
    fn test_zero_trials_is_rejected() {
        let config = VillageConfig::default();
        let graph = config.graph().unwrap();
        let benchmark = Benchmark::from_config(&graph, &config).with_trials(0);
        assert!(matches!(
            benchmark.compare(
                &GreedyNearest,
                Route::new(),
                &ScoredGreedy,
                Route::new(),
                &mut Rng::seed_from_u64(1),
            ),
            Err(RobotError::InvalidConfig(_))
        ));
    }
}
