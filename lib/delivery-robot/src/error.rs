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

use crate::graph::Place;

/// Delivery robot error.
///
/// Moving to a place that is not adjacent is deliberately absent here: the world treats it as a
/// wasted turn, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RobotError {
    /// The graph was asked about a place it never registered.
    #[error("unknown place: {0}")]
    UnknownPlace(Place),

    /// Breadth-first search ran out of frontier. The village graph is disconnected.
    #[error("no route from {from} to {to}")]
    NoRoute {
        /// Where the search started.
        from: Place,
        /// Where the search was headed.
        to: Place,
    },

    /// A road descriptor was not of the form `"A-B"` with two distinct, non-empty names.
    #[error("malformed road: {0:?}")]
    MalformedRoad(String),

    /// A fixed-route robot needs at least one stop.
    #[error("itinerary is empty")]
    EmptyItinerary,

    /// Robot name could not be parsed.
    #[error("unknown robot: {0}")]
    UnknownRobot(String),

    /// Configuration values that cannot produce a solvable task.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
