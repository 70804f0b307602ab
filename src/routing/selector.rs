//! Route selection between the fastest route and a forced scenic detour

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::graph::RoadGraph;
use super::shortest_path::{Metric, RouteResult, shortest_path};
use crate::budget::path_totals;

/// A (start, destination) pair that also gets a route forced through `waypoint`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detour {
    pub start: &'static str,
    pub destination: &'static str,
    pub waypoint: &'static str,
}

/// Trips from Chandigarh into the Kullu valley may go the long way via Shimla
pub const HIMACHAL_DETOURS: &[Detour] = &[
    Detour {
        start: "Chandigarh",
        destination: "Manali",
        waypoint: "Shimla",
    },
    Detour {
        start: "Chandigarh",
        destination: "Kullu",
        waypoint: "Shimla",
    },
];

/// The fastest route plus the detour route when one applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    pub fastest: RouteResult,
    pub alternative: Option<RouteResult>,
    /// Waypoint the alternative is forced through
    pub waypoint: Option<String>,
}

impl RouteOptions {
    /// Pick the route to drive.
    ///
    /// Without a preference for speed the detour wins whenever it exists.
    /// With one, the detour still wins if it is strictly faster.
    #[must_use]
    pub fn choose(&self, prefer_fastest: bool) -> &RouteResult {
        match &self.alternative {
            Some(alternative) if !prefer_fastest => alternative,
            Some(alternative) if alternative.cost < self.fastest.cost => alternative,
            _ => &self.fastest,
        }
    }
}

/// Applies the detour table on top of plain shortest-path search
#[derive(Debug, Clone, Copy)]
pub struct RouteSelector<'a> {
    graph: &'a RoadGraph,
    detours: &'a [Detour],
}

impl<'a> RouteSelector<'a> {
    #[must_use]
    pub fn new(graph: &'a RoadGraph, detours: &'a [Detour]) -> Self {
        Self { graph, detours }
    }

    #[must_use]
    pub fn himachal(graph: &'a RoadGraph) -> Self {
        Self::new(graph, HIMACHAL_DETOURS)
    }

    #[must_use]
    pub fn waypoint_for(&self, start: &str, destination: &str) -> Option<&'static str> {
        self.detours
            .iter()
            .find(|d| d.start == start && d.destination == destination)
            .map(|d| d.waypoint)
    }

    #[must_use]
    pub fn select_route(&self, start: &str, destination: &str) -> RouteOptions {
        let fastest = shortest_path(self.graph, start, destination, Metric::Duration);

        let waypoint = self.waypoint_for(start, destination);
        let alternative = waypoint.and_then(|via| self.forced_via(start, via, destination));

        debug!(
            start,
            destination,
            fastest_cost = fastest.cost,
            alternative_cost = alternative.as_ref().map(|a| a.cost),
            "Selected route options"
        );

        RouteOptions {
            fastest,
            waypoint: alternative.as_ref().and(waypoint).map(str::to_string),
            alternative,
        }
    }

    /// Fastest route that passes through `via`. Its cost is recomputed from the
    /// edges of the joined path rather than added up from the two legs.
    fn forced_via(&self, start: &str, via: &str, destination: &str) -> Option<RouteResult> {
        let first = shortest_path(self.graph, start, via, Metric::Duration);
        let second = shortest_path(self.graph, via, destination, Metric::Duration);
        if !first.is_reachable() || !second.is_reachable() {
            debug!(start, via, destination, "Detour leg unreachable");
            return None;
        }

        let mut path = first.path;
        path.extend(second.path.into_iter().skip(1));
        let cost = path_totals(self.graph, &path).duration_min;
        Some(RouteResult { path, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use crate::routing::Edge;
    use rstest::rstest;

    fn himachal() -> RoadGraph {
        RoadGraph::himachal().unwrap()
    }

    #[test]
    fn test_manali_gets_shimla_detour() {
        let graph = himachal();
        let options = RouteSelector::himachal(&graph).select_route("Chandigarh", "Manali");

        let alternative = options.alternative.as_ref().unwrap();
        assert_eq!(
            alternative.path,
            vec!["Chandigarh", "Solan", "Shimla", "Kullu", "Manali"]
        );
        assert_eq!(alternative.cost, 680.0);
        assert_eq!(options.fastest.cost, 480.0);
        assert_eq!(options.waypoint.as_deref(), Some("Shimla"));
    }

    #[test]
    fn test_waypoint_appears_once() {
        let graph = himachal();
        let options = RouteSelector::himachal(&graph).select_route("Chandigarh", "Kullu");
        let alternative = options.alternative.unwrap();
        assert_eq!(alternative.path.iter().filter(|t| *t == "Shimla").count(), 1);
        assert_eq!(alternative.cost, 600.0);
    }

    #[rstest]
    #[case("Kasol")]
    #[case("Shimla")]
    #[case("Spiti")]
    fn test_no_detour_outside_table(#[case] destination: &str) {
        let graph = himachal();
        let options = RouteSelector::himachal(&graph).select_route("Chandigarh", destination);
        assert!(options.alternative.is_none());
        assert!(options.waypoint.is_none());
    }

    #[rstest]
    #[case(false, "Solan")]
    #[case(true, "Kiratpur")]
    fn test_preference_decides_when_detour_is_slower(
        #[case] prefer_fastest: bool,
        #[case] second_stop: &str,
    ) {
        let graph = himachal();
        let options = RouteSelector::himachal(&graph).select_route("Chandigarh", "Manali");
        assert_eq!(options.choose(prefer_fastest).path[1], second_stop);
    }

    #[test]
    fn test_strictly_faster_detour_wins_even_when_preferring_fastest() {
        let options = RouteOptions {
            fastest: RouteResult {
                path: vec!["A".into(), "B".into()],
                cost: 100.0,
            },
            alternative: Some(RouteResult {
                path: vec!["A".into(), "W".into(), "B".into()],
                cost: 90.0,
            }),
            waypoint: Some("W".into()),
        };
        assert_eq!(options.choose(true).cost, 90.0);
    }

    #[test]
    fn test_equal_cost_detour_only_chosen_without_preference() {
        let route = RouteResult {
            path: vec!["A".into(), "B".into()],
            cost: 100.0,
        };
        let detour = RouteResult {
            path: vec!["A".into(), "W".into(), "B".into()],
            cost: 100.0,
        };
        let options = RouteOptions {
            fastest: route.clone(),
            alternative: Some(detour.clone()),
            waypoint: Some("W".into()),
        };
        assert_eq!(options.choose(true), &route);
        assert_eq!(options.choose(false), &detour);
    }

    #[test]
    fn test_unreachable_waypoint_drops_detour() {
        let graph = RoadGraph::new(
            vec![
                Location::new(0.0, 0.0, "A"),
                Location::new(0.0, 0.0, "B"),
                Location::new(0.0, 0.0, "W"),
            ],
            vec![Edge::new("A", "B", 1.0, 1.0), Edge::new("W", "B", 1.0, 1.0)],
        )
        .unwrap();
        let detours = [Detour {
            start: "A",
            destination: "B",
            waypoint: "W",
        }];

        let options = RouteSelector::new(&graph, &detours).select_route("A", "B");
        assert!(options.alternative.is_none());
        assert_eq!(options.choose(false).path, vec!["A", "B"]);
    }

    #[test]
    fn test_unknown_destination_fails_closed() {
        let graph = himachal();
        let options = RouteSelector::himachal(&graph).select_route("Chandigarh", "Atlantis");
        assert!(!options.choose(false).is_reachable());
    }
}
