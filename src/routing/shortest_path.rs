//! Dijkstra search over the road network

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::graph::{Edge, RoadGraph};
use crate::error::TripPlannerError;

/// Which edge weight a search minimises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Distance,
    Duration,
}

impl Metric {
    #[must_use]
    pub fn weight(self, edge: &Edge) -> f64 {
        match self {
            Metric::Distance => edge.distance_km,
            Metric::Duration => edge.duration_min,
        }
    }
}

impl FromStr for Metric {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "km" | "distance" => Ok(Metric::Distance),
            "min" | "duration" => Ok(Metric::Duration),
            other => Err(TripPlannerError::validation(format!(
                "Unknown metric '{other}'. Must be one of: km, min"
            ))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Distance => write!(f, "km"),
            Metric::Duration => write!(f, "min"),
        }
    }
}

/// A path and its total cost under some metric.
///
/// An empty path means the goal is unreachable and the cost is infinite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub path: Vec<String>,
    pub cost: f64,
}

impl RouteResult {
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    #[must_use]
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, PartialEq)]
struct QueueEntry {
    cost: f64,
    node: usize,
}

impl Eq for QueueEntry {}

// Reversed so the max-heap pops the cheapest entry; equal costs pop the
// lower node index first.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `start` to `goal` under `metric`.
///
/// Unknown towns and unreachable goals yield [`RouteResult::unreachable`].
#[must_use]
pub fn shortest_path(graph: &RoadGraph, start: &str, goal: &str, metric: Metric) -> RouteResult {
    let (Some(source), Some(target)) = (graph.index_of(start), graph.index_of(goal)) else {
        debug!(start, goal, "Unknown endpoint, no route");
        return RouteResult::unreachable();
    };

    let mut best = vec![f64::INFINITY; graph.len()];
    let mut previous: Vec<Option<usize>> = vec![None; graph.len()];
    let mut settled = vec![false; graph.len()];
    let mut queue = BinaryHeap::new();

    best[source] = 0.0;
    queue.push(QueueEntry {
        cost: 0.0,
        node: source,
    });

    while let Some(QueueEntry { cost, node }) = queue.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        if node == target {
            break;
        }

        for (next, edge) in graph.outgoing_at(node) {
            let candidate = cost + metric.weight(edge);
            if candidate < best[*next] {
                best[*next] = candidate;
                previous[*next] = Some(node);
                queue.push(QueueEntry {
                    cost: candidate,
                    node: *next,
                });
            }
        }
    }

    if !best[target].is_finite() {
        debug!(start, goal, %metric, "Goal not reachable");
        return RouteResult::unreachable();
    }

    let mut path = vec![graph.name_at(target).to_string()];
    let mut current = target;
    while let Some(prev) = previous[current] {
        path.push(graph.name_at(prev).to_string());
        current = prev;
    }
    path.reverse();

    RouteResult {
        path,
        cost: best[target],
    }
}
