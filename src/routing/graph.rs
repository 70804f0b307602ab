//! Immutable road network
//!
//! The graph is validated once when it is built; afterwards every query is
//! read-only and total: unknown towns simply have no roads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::models::Location;

/// A directed road between two towns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Road distance in kilometers
    pub distance_km: f64,
    /// Driving time in minutes
    pub duration_min: f64,
}

impl Edge {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance_km: f64, duration_min: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance_km,
            duration_min,
        }
    }
}

/// Validated, immutable directed graph of towns and roads
#[derive(Debug, Clone)]
pub struct RoadGraph {
    locations: Vec<Location>,
    index: HashMap<String, usize>,
    /// Outgoing roads per location, paired with the target's index
    outgoing: Vec<Vec<(usize, Edge)>>,
}

impl RoadGraph {
    /// Build a graph, rejecting duplicate towns or roads, roads that touch
    /// unknown towns, and negative or non-finite weights.
    pub fn new(locations: Vec<Location>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            if index.insert(location.name.clone(), i).is_some() {
                return Err(GraphError::DuplicateLocation(location.name.clone()));
            }
        }

        let mut outgoing: Vec<Vec<(usize, Edge)>> = vec![Vec::new(); locations.len()];
        for edge in edges {
            let unknown = |missing: &str| GraphError::UnknownLocation {
                from: edge.from.clone(),
                to: edge.to.clone(),
                missing: missing.to_string(),
            };
            let source = *index.get(&edge.from).ok_or_else(|| unknown(&edge.from))?;
            let target = *index.get(&edge.to).ok_or_else(|| unknown(&edge.to))?;

            for (field, value) in [("distance", edge.distance_km), ("duration", edge.duration_min)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(GraphError::InvalidWeight {
                        from: edge.from,
                        to: edge.to,
                        field,
                        value,
                    });
                }
            }

            if outgoing[source].iter().any(|(t, _)| *t == target) {
                return Err(GraphError::DuplicateEdge {
                    from: edge.from,
                    to: edge.to,
                });
            }
            outgoing[source].push((target, edge));
        }

        Ok(Self {
            locations,
            index,
            outgoing,
        })
    }

    /// Number of towns
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.index.get(name).map(|&i| &self.locations[i])
    }

    /// All towns in insertion order
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Roads leaving `name` together with the town each one reaches.
    /// Empty for sinks and for unknown towns.
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a Location, &'a Edge)> + use<'a> {
        let roads: &[(usize, Edge)] = self
            .index
            .get(name)
            .map(|&i| self.outgoing[i].as_slice())
            .unwrap_or_default();
        roads.iter().map(|(target, edge)| (&self.locations[*target], edge))
    }

    /// Direct road from `from` to `to`, if there is one
    #[must_use]
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge> {
        let source = *self.index.get(from)?;
        let target = *self.index.get(to)?;
        self.outgoing[source]
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, edge)| edge)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn name_at(&self, index: usize) -> &str {
        &self.locations[index].name
    }

    pub(crate) fn outgoing_at(&self, index: usize) -> &[(usize, Edge)] {
        &self.outgoing[index]
    }
}
