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

use std::collections::VecDeque;

use crate::graph::{Graph, Place};
use crate::{HashSet, RobotError};

/// Places to walk through, in order, excluding the starting place.
pub type Route = Vec<Place>;

/// Shortest route from `from` to `to` using breadth-first search.
///
/// All roads have unit length, so the first time `to` shows up as a neighbor the route to it is a
/// shortest one. Among equally short routes the one through the earliest-listed neighbor at each
/// branch wins. A route from a place to itself is empty.
pub fn find_route(graph: &Graph, from: &Place, to: &Place) -> crate::Result<Route> {
    graph.neighbors(from)?;
    graph.neighbors(to)?;
    if from == to {
        return Ok(Route::new());
    }

    let mut frontier: VecDeque<(&Place, Route)> = VecDeque::new();
    frontier.push_back((from, Route::new()));
    let mut visited: HashSet<&Place> = HashSet::default();
    visited.insert(from);

    while let Some((at, route)) = frontier.pop_front() {
        for neighbor in graph.neighbors(at)? {
            if neighbor == to {
                let mut found = route;
                found.push(neighbor.clone());
                return Ok(found);
            }
            if visited.insert(neighbor) {
                let mut next = route.clone();
                next.push(neighbor.clone());
                frontier.push_back((neighbor, next));
            }
        }
    }

    Err(RobotError::NoRoute {
        from: from.clone(),
        to: to.clone(),
    })
}
