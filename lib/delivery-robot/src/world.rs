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

use std::fmt::{Display, Formatter};

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Place};
use crate::{Rng, RobotError};

/// A parcel waiting at `location` to be carried to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parcel {
    pub location: Place,
    pub destination: Place,
}

impl Parcel {
    pub fn new(location: impl Into<Place>, destination: impl Into<Place>) -> Self {
        Self {
            location: location.into(),
            destination: destination.into(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.location == self.destination
    }
}

/// Snapshot of the village: where the robot is and which parcels are still undelivered.
///
/// A WorldState never changes. Moving produces a new state and leaves the old one usable, which
/// lets the benchmark hand the same task to two robots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldState {
    agent_location: Place,
    parcels: Vec<Parcel>,
}

impl WorldState {
    /// Parcels that already sit at their destination are dropped.
    pub fn new(agent_location: impl Into<Place>, parcels: Vec<Parcel>) -> Self {
        Self {
            agent_location: agent_location.into(),
            parcels: parcels.into_iter().filter(|p| !p.is_delivered()).collect(),
        }
    }

    /// A task with `count` parcels at random places, each addressed to some other random place.
    /// The robot starts at `start`.
    pub fn random(
        graph: &Graph,
        start: &Place,
        count: usize,
        rng: &mut Rng,
    ) -> crate::Result<Self> {
        graph.neighbors(start)?;
        if count == 0 {
            return Err(RobotError::InvalidConfig(
                "at least one parcel is required".to_string(),
            ));
        }
        if graph.len() < 2 {
            return Err(RobotError::InvalidConfig(
                "parcels need at least two places".to_string(),
            ));
        }

        let places = graph.places();
        let mut parcels = Vec::with_capacity(count);
        for _ in 0..count {
            let destination = random_place(places, rng)?;
            let mut location = random_place(places, rng)?;
            while location == destination {
                location = random_place(places, rng)?;
            }
            parcels.push(Parcel {
                location,
                destination,
            });
        }

        Ok(Self {
            agent_location: start.clone(),
            parcels,
        })
    }

    pub fn agent_location(&self) -> &Place {
        &self.agent_location
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn is_done(&self) -> bool {
        self.parcels.is_empty()
    }

    /// Move the robot along one road to `destination`.
    ///
    /// Parcels at the robot's current place travel with it; any parcel that arrives at its
    /// destination is delivered and removed. A destination that is not adjacent leaves the state
    /// as it is. Fails only if the robot stands on a place the graph does not know.
    pub fn move_to(&self, graph: &Graph, destination: &Place) -> crate::Result<Self> {
        if !graph.neighbors(&self.agent_location)?.contains(destination) {
            return Ok(self.clone());
        }

        let parcels = self
            .parcels
            .iter()
            .map(|parcel| {
                if parcel.location == self.agent_location {
                    Parcel {
                        location: destination.clone(),
                        destination: parcel.destination.clone(),
                    }
                } else {
                    parcel.clone()
                }
            })
            .filter(|parcel| !parcel.is_delivered())
            .collect();

        Ok(Self {
            agent_location: destination.clone(),
            parcels,
        })
    }
}

fn random_place(places: &[Place], rng: &mut Rng) -> crate::Result<Place> {
    places
        .choose(rng)
        .cloned()
        .ok_or_else(|| RobotError::InvalidConfig("graph has no places".to_string()))
}

impl Display for WorldState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "robot at {}", self.agent_location)?;
        for parcel in &self.parcels {
            writeln!(f)?;
            write!(f, "  parcel at {} for {}", parcel.location, parcel.destination)?;
        }
        Ok(())
    }
}
