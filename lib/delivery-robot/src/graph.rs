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

use serde::{Deserialize, Serialize};

use crate::{HashMap, RobotError};

/// A named location in the village. Places carry no structure beyond their name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Place(String);

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Place {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Place {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Undirected road graph.
///
/// Neighbors keep the order in which roads were listed. Breadth-first search relies on that order
/// to break ties between equally short routes, so the same road list always yields the same routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: HashMap<Place, Vec<Place>>,
    places: Vec<Place>,
}

impl Graph {
    /// Build a graph from `"A-B"` road descriptors. Each road is registered in both directions.
    /// Repeated roads are registered once.
    pub fn build<I, S>(roads: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::default();
        for road in roads {
            let (from, to) = parse_road(road.as_ref())?;
            graph.connect(from.clone(), to.clone());
            graph.connect(to, from);
        }
        Ok(graph)
    }

    fn connect(&mut self, from: Place, to: Place) {
        if !self.adjacency.contains_key(&from) {
            self.places.push(from.clone());
        }
        let neighbors = self.adjacency.entry(from).or_default();
        if !neighbors.contains(&to) {
            neighbors.push(to);
        }
    }

    /// Places reachable in one step from `place`, in road-list order.
    pub fn neighbors(&self, place: &Place) -> crate::Result<&[Place]> {
        self.adjacency
            .get(place)
            .map(Vec::as_slice)
            .ok_or_else(|| RobotError::UnknownPlace(place.clone()))
    }

    pub fn contains(&self, place: &Place) -> bool {
        self.adjacency.contains_key(place)
    }

    /// Every registered place, in the order it first appeared in the road list.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

fn parse_road(road: &str) -> crate::Result<(Place, Place)> {
    let malformed = || RobotError::MalformedRoad(road.to_string());
    let (from, to) = road.split_once('-').ok_or_else(malformed)?;
    if from.is_empty() || to.is_empty() || to.contains('-') || from == to {
        return Err(malformed());
    }
    Ok((Place::from(from), Place::from(to)))
}
