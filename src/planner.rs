//! Trip planning: route choice, budget and itinerary for one request

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::budget::{
    Budget, PathTotals, Step, TripParameters, build_itinerary, format_duration, format_inr,
    path_totals, trip_budget,
};
use crate::routing::{Detour, HIMACHAL_DETOURS, RoadGraph, RouteResult, RouteSelector, WEATHER_ALIASES};
use crate::{Result, TripPlannerError};

/// A complete plan for a reachable destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub origin: String,
    pub destination: String,
    /// The route to drive
    pub route: RouteResult,
    pub fastest: RouteResult,
    pub alternative: Option<RouteResult>,
    pub waypoint: Option<String>,
    pub one_way: PathTotals,
    pub budget: Budget,
    pub itinerary: Vec<Step>,
    /// Great-circle distance between origin and destination
    pub straight_line_km: Option<f64>,
    pub summary: PlanSummary,
}

/// Display strings for the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub route: String,
    pub distance: String,
    pub time: String,
    pub budget: String,
    pub comparison: Option<String>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TripOutcome {
    Planned(Box<TripPlan>),
    NoRoute {
        origin: String,
        destination: String,
        message: String,
    },
}

/// Plans trips from a fixed origin over a shared road network
#[derive(Debug, Clone)]
pub struct TripPlanner {
    graph: Arc<RoadGraph>,
    origin: String,
    detours: &'static [Detour],
}

impl TripPlanner {
    #[must_use]
    pub fn new(graph: Arc<RoadGraph>, origin: impl Into<String>) -> Self {
        Self {
            graph,
            origin: origin.into(),
            detours: HIMACHAL_DETOURS,
        }
    }

    /// Planner over the built-in Himachal network starting at `origin`
    pub fn himachal(origin: impl Into<String>) -> Result<Self> {
        let graph = RoadGraph::himachal()?;
        let origin = origin.into();
        if !graph.contains(&origin) {
            return Err(TripPlannerError::config(format!(
                "Origin '{origin}' is not a town in the road network"
            )));
        }
        Ok(Self::new(Arc::new(graph), origin))
    }

    #[must_use]
    pub fn with_detours(mut self, detours: &'static [Detour]) -> Self {
        self.detours = detours;
        self
    }

    #[must_use]
    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destinations the traveller can pick: every other town plus alias labels
    #[must_use]
    pub fn destinations(&self) -> Vec<String> {
        self.graph
            .locations()
            .map(|l| l.name.clone())
            .filter(|name| *name != self.origin)
            .chain(WEATHER_ALIASES.iter().map(|(label, _)| (*label).to_string()))
            .collect()
    }

    #[instrument(skip(self, params), fields(destination = %params.destination))]
    pub fn plan(&self, params: &TripParameters) -> TripOutcome {
        let selector = RouteSelector::new(&self.graph, self.detours);
        let options = selector.select_route(&self.origin, &params.destination);
        let chosen = options.choose(params.prefer_fastest).clone();

        if !chosen.is_reachable() {
            info!("No route from {} to {}", self.origin, params.destination);
            return TripOutcome::NoRoute {
                origin: self.origin.clone(),
                destination: params.destination.clone(),
                message: "No route found in the current graph.".to_string(),
            };
        }

        let one_way = path_totals(&self.graph, &chosen.path);
        let budget = trip_budget(&one_way, params);
        let itinerary = build_itinerary(&self.graph, &chosen.path);

        let straight_line_km = self
            .graph
            .location(&self.origin)
            .zip(self.graph.location(&params.destination))
            .map(|(from, to)| from.straight_line_km(to));

        let comparison = options
            .alternative
            .as_ref()
            .zip(options.waypoint.as_deref())
            .map(|(alternative, waypoint)| {
                format!(
                    "Comparison: {waypoint} route total time {} vs fastest {}",
                    format_duration(alternative.cost),
                    format_duration(options.fastest.cost)
                )
            });

        let summary = PlanSummary {
            route: chosen.path.join(" → "),
            distance: format!("{} km (one-way)", one_way.distance_km.round()),
            time: format!("{} (one-way)", format_duration(one_way.duration_min)),
            budget: format!("{} (round trip + stay)", format_inr(budget.total)),
            comparison,
            steps: itinerary.iter().map(ToString::to_string).collect(),
        };

        info!(
            route = %summary.route,
            km = one_way.distance_km,
            total = budget.total,
            "Planned trip"
        );

        TripOutcome::Planned(Box::new(TripPlan {
            origin: self.origin.clone(),
            destination: params.destination.clone(),
            route: chosen,
            fastest: options.fastest,
            alternative: options.alternative,
            waypoint: options.waypoint,
            one_way,
            budget,
            itinerary,
            straight_line_km,
            summary,
        }))
    }
}
