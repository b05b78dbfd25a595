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

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Place};
use crate::path::{find_route, Route};
use crate::world::{Parcel, WorldState};
use crate::{Result, Rng, RobotError};

/// What a robot wants to do this turn, plus the memory it wants back next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<M> {
    pub direction: Place,
    pub memory: M,
}

/// A Strategy picks the next place to walk to.
///
/// The Strategy does not hold on to anything between turns. Whatever it wants to remember, e.g. the
/// rest of a planned route, goes into `Memory`, which the simulation hands back on the next call.
/// A direction that is not adjacent to the robot simply wastes a turn.
pub trait Strategy {
    type Memory: Clone + Default + Debug;

    fn decide(
        &self,
        graph: &Graph,
        state: &WorldState,
        memory: Self::Memory,
        rng: &mut Rng,
    ) -> Result<Decision<Self::Memory>>;
}

/// Walks to a uniformly random neighbor every turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomRobot;

impl Strategy for RandomRobot {
    type Memory = ();

    fn decide(
        &self,
        graph: &Graph,
        state: &WorldState,
        _memory: (),
        rng: &mut Rng,
    ) -> Result<Decision<()>> {
        let direction = graph
            .neighbors(state.agent_location())?
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| state.agent_location().clone());
        Ok(Decision {
            direction,
            memory: (),
        })
    }
}

/// Follows a fixed tour of the village over and over, ignoring where parcels are.
///
/// As long as the tour passes every place, every parcel is eventually picked up and delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRoute {
    itinerary: Vec<Place>,
}

impl FixedRoute {
    pub fn new(itinerary: Vec<Place>) -> Result<Self> {
        if itinerary.is_empty() {
            return Err(RobotError::EmptyItinerary);
        }
        Ok(Self { itinerary })
    }

    pub fn itinerary(&self) -> &[Place] {
        &self.itinerary
    }
}

impl Strategy for FixedRoute {
    type Memory = Route;

    fn decide(
        &self,
        _graph: &Graph,
        _state: &WorldState,
        memory: Route,
        _rng: &mut Rng,
    ) -> Result<Decision<Route>> {
        let remaining = if memory.is_empty() {
            &self.itinerary[..]
        } else {
            &memory[..]
        };
        let (direction, rest) = remaining
            .split_first()
            .ok_or(RobotError::EmptyItinerary)?;
        Ok(Decision {
            direction: direction.clone(),
            memory: rest.to_vec(),
        })
    }
}

/// Plans a shortest route for the first parcel in the list: to pick it up if it is elsewhere, or
/// to its address if the robot is already carrying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyNearest;

impl Strategy for GreedyNearest {
    type Memory = Route;

    fn decide(
        &self,
        graph: &Graph,
        state: &WorldState,
        memory: Route,
        _rng: &mut Rng,
    ) -> Result<Decision<Route>> {
        if !memory.is_empty() {
            return Ok(follow(state, memory));
        }
        match state.parcels().first() {
            Some(parcel) => {
                let (route, _) = leg(graph, state.agent_location(), parcel)?;
                Ok(follow(state, route))
            }
            None => Ok(follow(state, Route::new())),
        }
    }
}

/// Plans a route for every parcel and follows the best scoring one.
///
/// Shorter routes score higher. A pickup gets a half-step bonus, so between a pickup and a
/// delivery of the same length the robot collects another parcel first. Equal scores go to the
/// parcel listed first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoredGreedy;

/// Score of a candidate route for [`ScoredGreedy`].
pub fn route_score(route: &[Place], is_pickup: bool) -> f64 {
    let bonus = if is_pickup { 0.5 } else { 0.0 };
    bonus - route.len() as f64
}

impl Strategy for ScoredGreedy {
    type Memory = Route;

    fn decide(
        &self,
        graph: &Graph,
        state: &WorldState,
        memory: Route,
        _rng: &mut Rng,
    ) -> Result<Decision<Route>> {
        if !memory.is_empty() {
            return Ok(follow(state, memory));
        }

        let mut best: Option<(Route, f64)> = None;
        for parcel in state.parcels() {
            let (route, is_pickup) = leg(graph, state.agent_location(), parcel)?;
            let score = route_score(&route, is_pickup);
            if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
                best = Some((route, score));
            }
        }

        let route = best.map(|(route, _)| route).unwrap_or_default();
        Ok(follow(state, route))
    }
}

/// The route for the parcel's next leg, and whether that leg is a pickup.
fn leg(graph: &Graph, at: &Place, parcel: &Parcel) -> Result<(Route, bool)> {
    if parcel.location != *at {
        Ok((find_route(graph, at, &parcel.location)?, true))
    } else {
        Ok((find_route(graph, at, &parcel.destination)?, false))
    }
}

// Take the next step of a route. With nothing to follow the robot stays put, which the world
// treats as a wasted turn.
fn follow(state: &WorldState, route: Route) -> Decision<Route> {
    match route.split_first() {
        Some((direction, rest)) => Decision {
            direction: direction.clone(),
            memory: rest.to_vec(),
        },
        None => Decision {
            direction: state.agent_location().clone(),
            memory: Route::new(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RobotKind {
    Random,
    FixedRoute,
    GreedyNearest,
    ScoredGreedy,
}

impl RobotKind {
    pub const ALL: [RobotKind; 4] = [
        RobotKind::Random,
        RobotKind::FixedRoute,
        RobotKind::GreedyNearest,
        RobotKind::ScoredGreedy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RobotKind::Random => "random",
            RobotKind::FixedRoute => "fixed-route",
            RobotKind::GreedyNearest => "greedy-nearest",
            RobotKind::ScoredGreedy => "scored-greedy",
        }
    }
}

impl Display for RobotKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RobotKind {
    type Err = RobotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(RobotKind::Random),
            "route" | "fixed-route" => Ok(RobotKind::FixedRoute),
            "goal" | "greedy-nearest" => Ok(RobotKind::GreedyNearest),
            "scored" | "scored-greedy" => Ok(RobotKind::ScoredGreedy),
            _ => Err(RobotError::UnknownRobot(s.to_string())),
        }
    }
}

/// Any of the robots, chosen at runtime. Every variant remembers a [`Route`]: the rest of the tour
/// for a fixed-route robot, the rest of the planned leg for the greedy ones, and nothing for the
/// random robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Robot {
    Random(RandomRobot),
    FixedRoute(FixedRoute),
    GreedyNearest(GreedyNearest),
    ScoredGreedy(ScoredGreedy),
}

impl Robot {
    /// `itinerary` is only used by the fixed-route robot.
    pub fn from_kind(kind: RobotKind, itinerary: Vec<Place>) -> Result<Self> {
        Ok(match kind {
            RobotKind::Random => Robot::Random(RandomRobot),
            RobotKind::FixedRoute => Robot::FixedRoute(FixedRoute::new(itinerary)?),
            RobotKind::GreedyNearest => Robot::GreedyNearest(GreedyNearest),
            RobotKind::ScoredGreedy => Robot::ScoredGreedy(ScoredGreedy),
        })
    }

    pub fn kind(&self) -> RobotKind {
        match self {
            Robot::Random(_) => RobotKind::Random,
            Robot::FixedRoute(_) => RobotKind::FixedRoute,
            Robot::GreedyNearest(_) => RobotKind::GreedyNearest,
            Robot::ScoredGreedy(_) => RobotKind::ScoredGreedy,
        }
    }
}

impl Strategy for Robot {
    type Memory = Route;

    fn decide(
        &self,
        graph: &Graph,
        state: &WorldState,
        memory: Route,
        rng: &mut Rng,
    ) -> Result<Decision<Route>> {
        match self {
            Robot::Random(robot) => {
                let decision = robot.decide(graph, state, (), rng)?;
                Ok(Decision {
                    direction: decision.direction,
                    memory: Route::new(),
                })
            }
            Robot::FixedRoute(robot) => robot.decide(graph, state, memory, rng),
            Robot::GreedyNearest(robot) => robot.decide(graph, state, memory, rng),
            Robot::ScoredGreedy(robot) => robot.decide(graph, state, memory, rng),
        }
    }
}
