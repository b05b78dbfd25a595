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

use tracing::{debug, info};

use crate::graph::{Graph, Place};
use crate::robot::Strategy;
use crate::world::WorldState;
use crate::{Result, Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Log every move and the final turn count.
    Trace,
    /// Only count turns.
    Count,
}

/// A Simulation runs a single robot until every parcel is delivered.
///
/// The simulation owns the current world state and the robot's memory, and threads the memory
/// from one decision into the next. There is no turn limit: a robot that never finishes keeps the
/// simulation running.
pub struct Simulation<'a, S: Strategy> {
    graph: &'a Graph,
    strategy: &'a S,
    state: WorldState,
    memory: S::Memory,
    turns: usize,
}

impl<'a, S: Strategy> Simulation<'a, S> {
    pub fn new(graph: &'a Graph, strategy: &'a S, state: WorldState, memory: S::Memory) -> Self {
        Self {
            graph,
            strategy,
            state,
            memory,
            turns: 0,
        }
    }

    /// Ask the robot for one move and apply it. Returns where the robot asked to go.
    pub fn step(&mut self, rng: &mut Rng) -> Result<Place> {
        let memory = std::mem::take(&mut self.memory);
        let decision = self
            .strategy
            .decide(self.graph, &self.state, memory, rng)?;
        self.state = self.state.move_to(self.graph, &decision.direction)?;
        self.memory = decision.memory;
        self.turns += 1;
        Ok(decision.direction)
    }

    pub fn run(&mut self, mode: RunMode, rng: &mut Rng) -> Result<usize> {
        while !self.state.is_done() {
            let direction = self.step(rng)?;
            match mode {
                RunMode::Trace => info!(
                    turn = self.turns,
                    parcels = self.state.parcels().len(),
                    "moved to {}",
                    direction
                ),
                RunMode::Count => debug!(turn = self.turns, "moved to {}", direction),
            }
        }
        if mode == RunMode::Trace {
            info!(turns = self.turns, "done in {} turns", self.turns);
        }
        Ok(self.turns)
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn memory(&self) -> &S::Memory {
        &self.memory
    }
}

/// Run a robot to completion, logging every move.
pub fn run_robot<S: Strategy>(
    graph: &Graph,
    state: WorldState,
    strategy: &S,
    memory: S::Memory,
    rng: &mut Rng,
) -> Result<usize> {
    Simulation::new(graph, strategy, state, memory).run(RunMode::Trace, rng)
}

/// Number of turns a robot needs to deliver every parcel.
pub fn count_steps<S: Strategy>(
    graph: &Graph,
    state: WorldState,
    strategy: &S,
    memory: S::Memory,
    rng: &mut Rng,
) -> Result<usize> {
    Simulation::new(graph, strategy, state, memory).run(RunMode::Count, rng)
}
