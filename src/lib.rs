//! `TripPlanner` - road trip planning for the Himachal hill towns
//!
//! This library provides the road network, shortest-path routing, the
//! scenic-detour policy, trip cost arithmetic and destination weather.

pub mod api;
pub mod budget;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod routing;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use budget::{Budget, PathTotals, Step, TripParameters};
pub use config::TripPlannerConfig;
pub use error::{GraphError, TripPlannerError};
pub use models::{CurrentConditions, Location};
pub use planner::{TripOutcome, TripPlan, TripPlanner};
pub use routing::{Edge, Metric, RoadGraph, RouteOptions, RouteResult, RouteSelector, shortest_path};
pub use weather::{OpenMeteoClient, WeatherProvider, WeatherReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
