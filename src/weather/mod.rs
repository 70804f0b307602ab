//! Destination weather
//!
//! Weather is advisory: a failed lookup turns into
//! [`WeatherReport::Unavailable`] and never touches the route or budget.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::models::{CurrentConditions, Location};
use crate::routing::{DEFAULT_WEATHER_LOCATION, RoadGraph, weather_key};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Source of current conditions for a location
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(&self, location: &Location) -> anyhow::Result<CurrentConditions>;
}

/// Outcome of a weather lookup as shown to the traveller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherReport {
    Available {
        location: String,
        #[serde(flatten)]
        conditions: CurrentConditions,
        display: WeatherDisplay,
    },
    Unavailable {
        location: String,
        message: String,
    },
}

/// Measurements formatted with units, "-" where the provider had none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDisplay {
    pub temperature: String,
    pub wind: String,
    pub precipitation: String,
}

impl From<&CurrentConditions> for WeatherDisplay {
    fn from(conditions: &CurrentConditions) -> Self {
        Self {
            temperature: conditions.format_temperature(),
            wind: conditions.format_wind(),
            precipitation: conditions.format_precipitation(),
        }
    }
}

/// Town whose coordinates stand in for `destination`: aliases first, then
/// the town itself, then the default town.
#[must_use]
pub fn resolve_weather_location<'a>(graph: &'a RoadGraph, destination: &str) -> Option<&'a Location> {
    let key = weather_key(destination);
    graph.location(key).or_else(|| {
        debug!(destination, "No coordinates, falling back to {DEFAULT_WEATHER_LOCATION}");
        graph.location(DEFAULT_WEATHER_LOCATION)
    })
}

/// Look up current weather for a destination label
#[instrument(skip(provider, graph))]
pub async fn weather_for(
    provider: &dyn WeatherProvider,
    graph: &RoadGraph,
    destination: &str,
) -> WeatherReport {
    let Some(location) = resolve_weather_location(graph, destination) else {
        return WeatherReport::Unavailable {
            location: destination.to_string(),
            message: "Failed to load weather.".to_string(),
        };
    };

    match provider.current_conditions(location).await {
        Ok(conditions) => WeatherReport::Available {
            location: location.name.clone(),
            display: WeatherDisplay::from(&conditions),
            conditions,
        },
        Err(e) => {
            warn!("Weather lookup for {} failed: {:#}", location.name, e);
            WeatherReport::Unavailable {
                location: location.name.clone(),
                message: "Failed to load weather.".to_string(),
            }
        }
    }
}
