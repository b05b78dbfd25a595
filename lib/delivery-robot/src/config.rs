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

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Place};
use crate::robot::FixedRoute;
use crate::RobotError;

/// Error loading a village description.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Village(#[from] RobotError),
}

/// Village description: the roads, the mail route, where the robot starts and how many parcels a
/// random task has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageConfig {
    pub roads: Vec<String>,
    pub itinerary: Vec<String>,
    pub start: String,
    pub parcels: usize,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            roads: [
                "Alice's House-Bob's House",
                "Alice's House-Cabin",
                "Alice's House-Post Office",
                "Bob's House-Town Hall",
                "Daria's House-Ernie's House",
                "Daria's House-Town Hall",
                "Ernie's House-Grete's House",
                "Grete's House-Farm",
                "Grete's House-Shop",
                "Marketplace-Farm",
                "Marketplace-Post Office",
                "Marketplace-Shop",
                "Marketplace-Town Hall",
                "Shop-Town Hall",
            ]
            .iter()
            .map(|road| road.to_string())
            .collect(),
            itinerary: [
                "Alice's House",
                "Cabin",
                "Alice's House",
                "Bob's House",
                "Town Hall",
                "Daria's House",
                "Ernie's House",
                "Grete's House",
                "Shop",
                "Grete's House",
                "Farm",
                "Marketplace",
                "Post Office",
            ]
            .iter()
            .map(|stop| stop.to_string())
            .collect(),
            start: "Post Office".to_string(),
            parcels: 5,
        }
    }
}

impl VillageConfig {
    /// Parse and validate. Missing fields fall back to the default village.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the roads parse, the start and every itinerary stop are on the map, the
    /// itinerary is a walkable tour of the whole village, and a task can be generated.
    pub fn validate(&self) -> crate::Result<()> {
        let graph = self.graph()?;
        let start = self.start_place();
        graph.neighbors(&start)?;
        let itinerary = self.route_robot()?.itinerary().to_vec();
        for stop in &itinerary {
            graph.neighbors(stop)?;
        }
        validate_tour(&graph, &start, &itinerary)?;
        if self.parcels == 0 {
            return Err(RobotError::InvalidConfig(
                "at least one parcel is required".to_string(),
            ));
        }
        if graph.len() < 2 {
            return Err(RobotError::InvalidConfig(
                "the village needs at least two places".to_string(),
            ));
        }
        Ok(())
    }

    pub fn graph(&self) -> crate::Result<Graph> {
        Graph::build(&self.roads)
    }

    pub fn start_place(&self) -> Place {
        Place::from(self.start.as_str())
    }

    pub fn itinerary(&self) -> Vec<Place> {
        self.itinerary
            .iter()
            .map(|stop| Place::from(stop.as_str()))
            .collect()
    }

    pub fn route_robot(&self) -> crate::Result<FixedRoute> {
        FixedRoute::new(self.itinerary())
    }
}

// The fixed-route robot asks for the stops blindly, so it only ever moves if every request is one
// road away from where it stands: from the start to the first stop, between consecutive stops, and
// from the last stop back around to the first.
fn validate_tour(graph: &Graph, start: &Place, itinerary: &[Place]) -> crate::Result<()> {
    if let Some(missing) = graph.places().iter().find(|p| !itinerary.contains(p)) {
        return Err(RobotError::InvalidConfig(format!(
            "itinerary never visits {}",
            missing
        )));
    }

    let legs = std::iter::once(start)
        .chain(itinerary.iter())
        .zip(itinerary.iter().chain(itinerary.first()));
    for (from, to) in legs {
        if !graph.neighbors(from)?.contains(to) {
            return Err(RobotError::InvalidConfig(format!(
                "itinerary jumps from {} to {} without a road",
                from, to
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_village_is_valid() {
        let config = VillageConfig::default();
        assert_eq!(config.validate(), Ok(()));
        let graph = config.graph().unwrap();
        assert_eq!(graph.len(), 11);
        assert_eq!(config.route_robot().unwrap().itinerary().len(), 13);
    }

    #[test]
    fn test_itinerary_visits_every_place() {
        let config = VillageConfig::default();
        let graph = config.graph().unwrap();
        let itinerary = config.itinerary();
        for p in graph.places() {
            assert!(itinerary.contains(p), "missing: {}", p);
        }
    }

    #[test]
    fn test_bundled_village_matches_default() {
        let config = VillageConfig::from_json_str(include_str!("../../../data/village.json"))
            .expect("bundled village should parse");
        assert_eq!(config, VillageConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = VillageConfig::from_json_str(r#"{"parcels": 3}"#).unwrap();
        assert_eq!(config.parcels, 3);
        assert_eq!(config.start, "Post Office");
        assert_eq!(config.roads.len(), 14);
    }

    #[test]
    fn test_small_village() {
        let json = r#"{
            "roads": ["Home-Shop", "Shop-Park"],
            "itinerary": ["Shop", "Park", "Shop", "Home"],
            "start": "Home",
            "parcels": 2
        }"#;
        let config = VillageConfig::from_json_str(json).unwrap();
        assert_eq!(config.graph().unwrap().len(), 3);
        assert_eq!(config.start_place(), Place::from("Home"));
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let cases = [
            r#"{"start": "Moon"}"#,
            r#"{"itinerary": []}"#,
            r#"{"itinerary": ["Moon"]}"#,
            r#"{"parcels": 0}"#,
            r#"{"roads": ["Alice's House"]}"#,
            r#"{"itinerary": ["Cabin"]}"#,
        ];
        for json in cases {
            assert!(
                matches!(
                    VillageConfig::from_json_str(json),
                    Err(ConfigError::Village(_))
                ),
                "json: {}",
                json
            );
        }
        assert!(matches!(
            VillageConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            VillageConfig::from_path("/nonexistent/village.json"),
            Err(ConfigError::Io(_))
        ));
    }

    fn small_village(itinerary: &[&str]) -> VillageConfig {
        VillageConfig {
            roads: vec!["Home-Shop".to_string(), "Shop-Park".to_string()],
            itinerary: itinerary.iter().map(|stop| stop.to_string()).collect(),
            start: "Home".to_string(),
            parcels: 2,
        }
    }

    #[test]
    fn test_itinerary_must_cover_every_place() {
        assert_eq!(
            small_village(&["Shop", "Home"]).validate(),
            Err(RobotError::InvalidConfig("itinerary never visits Park".to_string()))
        );
    }

    #[test]
    fn test_itinerary_must_be_walkable() {
        // Park is not next to Home.
        assert_eq!(
            small_village(&["Park", "Shop", "Home"]).validate(),
            Err(RobotError::InvalidConfig(
                "itinerary jumps from Home to Park without a road".to_string()
            ))
        );
        // Home to Shop to Park is fine, but Park has no road to Home.
        assert_eq!(
            small_village(&["Shop", "Park", "Home"]).validate(),
            Err(RobotError::InvalidConfig(
                "itinerary jumps from Park to Home without a road".to_string()
            ))
        );
        // The tour must also close: the last stop leads back to the first.
        assert_eq!(
            small_village(&["Shop", "Park", "Shop", "Home", "Shop"]).validate(),
            Err(RobotError::InvalidConfig(
                "itinerary jumps from Shop to Shop without a road".to_string()
            ))
        );
    }

    #[test]
    fn test_rotated_default_tour_must_start_next_to_start() {
        let mut config = VillageConfig::default();
        config.itinerary.rotate_left(1);
        assert_eq!(
            config.validate(),
            Err(RobotError::InvalidConfig(
                "itinerary jumps from Post Office to Cabin without a road".to_string()
            ))
        );
    }

    #[test]
    fn test_validated_tour_delivers_everything() {
        use rand::SeedableRng;

        use crate::{count_steps, Rng, Route, WorldState};

        let config = small_village(&["Shop", "Park", "Shop", "Home"]);
        assert_eq!(config.validate(), Ok(()));
        let graph = config.graph().unwrap();
        let robot = config.route_robot().unwrap();
        let mut rng = Rng::seed_from_u64(3);
        for _ in 0..20 {
            let state =
                WorldState::random(&graph, &config.start_place(), config.parcels, &mut rng)
                    .unwrap();
            let turns = count_steps(&graph, state, &robot, Route::new(), &mut rng).unwrap();
            assert!(turns <= 8, "turns: {}", turns);
        }
    }
}
