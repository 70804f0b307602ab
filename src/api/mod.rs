use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    budget::TripParameters,
    config::TripDefaults,
    planner::{TripOutcome, TripPlanner},
    weather::{WeatherProvider, WeatherReport, weather_for},
};

/// Shared, read-only state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub weather: Arc<dyn WeatherProvider>,
    pub defaults: Arc<TripDefaults>,
}

/// Raw form values. Numbers stay strings so that blanks and garbage fall
/// back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanQuery {
    #[serde(default)]
    pub destination: String,
    pub people: Option<String>,
    pub days: Option<String>,
    pub mileage: Option<String>,
    pub fuel_price: Option<String>,
    pub tolls: Option<String>,
    pub stay_per_day: Option<String>,
    pub prefer_fastest: Option<String>,
}

impl PlanQuery {
    /// Fill in the trip parameters, using `defaults` for any field that is
    /// missing, zero or not a number.
    #[must_use]
    pub fn into_parameters(self, defaults: &TripDefaults) -> TripParameters {
        TripParameters {
            people: count_or(self.people.as_deref(), defaults.people),
            days: count_or(self.days.as_deref(), defaults.days),
            mileage_km_per_litre: amount_or(self.mileage.as_deref(), defaults.mileage),
            fuel_price: amount_or(self.fuel_price.as_deref(), defaults.fuel_price),
            tolls: amount_or(self.tolls.as_deref(), defaults.tolls),
            stay_per_day: amount_or(self.stay_per_day.as_deref(), defaults.stay_per_day),
            prefer_fastest: self
                .prefer_fastest
                .as_deref()
                .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes")),
            destination: self.destination.trim().to_string(),
        }
    }
}

/// Largest rupee amount or mileage taken from the form
const MAX_AMOUNT: f64 = 1e9;
/// Magnitudes below this count as zero
const MIN_AMOUNT: f64 = 1e-6;
/// Largest head count or number of days taken from the form
const MAX_COUNT: u32 = 10_000;

// Bounded inputs keep every budget product finite.
fn amount_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| (MIN_AMOUNT..=MAX_AMOUNT).contains(&v.abs()))
        .unwrap_or(default)
}

/// Whole people and days: fractions are truncated, anything below one or
/// above [`MAX_COUNT`] falls back to `default`.
fn count_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| (1.0..=f64::from(MAX_COUNT)).contains(v))
        .map_or(default, |v| v.trunc() as u32)
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub destination: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DestinationsResponse {
    pub origin: String,
    pub destinations: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/destinations", get(get_destinations))
        .route("/plan", get(get_plan))
        .route("/weather", get(get_weather))
        .with_state(state)
}

async fn get_destinations(State(state): State<AppState>) -> Json<DestinationsResponse> {
    Json(DestinationsResponse {
        origin: state.planner.origin().to_string(),
        destinations: state.planner.destinations(),
    })
}

async fn get_plan(State(state): State<AppState>, Query(query): Query<PlanQuery>) -> Json<TripOutcome> {
    let params = query.into_parameters(&state.defaults);
    Json(state.planner.plan(&params))
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherReport> {
    let report = weather_for(state.weather.as_ref(), state.planner.graph(), query.destination.trim()).await;
    Json(report)
}
