//! Open-Meteo current conditions client

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{CurrentConditions, Location};

const CURRENT_FIELDS: &str = "temperature_2m,precipitation,wind_speed_10m";

/// Weather client for the keyless Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripPlanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self, location), fields(location = %location.name))]
    async fn current_conditions(&self, location: &Location) -> Result<CurrentConditions> {
        let start_time = Instant::now();
        let url = format!("{}/forecast", self.base_url);
        debug!("Open-Meteo request for {}", location.format_coordinates());

        let response = self
            .client
            .get(&url)
            .query(&[("latitude", location.latitude), ("longitude", location.longitude)])
            .query(&[
                ("current", CURRENT_FIELDS),
                ("wind_speed_unit", "ms"),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .with_context(|| format!("Weather request to {url} failed"))?
            .error_for_status()
            .with_context(|| "Open-Meteo returned an error status")?;

        let forecast: ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Open-Meteo forecast response")?;

        let elapsed = start_time.elapsed();
        info!("Retrieved current weather in {:.3}s", elapsed.as_secs_f64());
        if elapsed.as_secs() > 5 {
            warn!("Slow weather response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(forecast.into())
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    pub time: Option<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<f64>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
}

impl From<ForecastResponse> for CurrentConditions {
    fn from(response: ForecastResponse) -> Self {
        let Some(current) = response.current else {
            return CurrentConditions::default();
        };
        CurrentConditions {
            observed_at: current
                .time
                .as_deref()
                .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok()),
            temperature: current.temperature,
            wind_speed: current.wind_speed,
            precipitation: current.precipitation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TripPlannerConfig;

    #[test]
    fn test_parse_current_block() {
        let body = r#"{
            "latitude": 32.25,
            "longitude": 77.1875,
            "current": {
                "time": "2025-01-15T14:30",
                "interval": 900,
                "temperature_2m": -1.4,
                "precipitation": 0.0,
                "wind_speed_10m": 2.7
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        let conditions = CurrentConditions::from(response);

        assert_eq!(conditions.temperature, Some(-1.4));
        assert_eq!(conditions.wind_speed, Some(2.7));
        assert_eq!(conditions.precipitation, Some(0.0));
        assert_eq!(
            conditions.observed_at.unwrap().format("%H:%M").to_string(),
            "14:30"
        );
    }

    #[test]
    fn test_missing_current_block_is_all_unknown() {
        let response: ForecastResponse = serde_json::from_str(r#"{"latitude": 1.0}"#).unwrap();
        assert_eq!(CurrentConditions::from(response), CurrentConditions::default());
    }

    #[test]
    fn test_partial_current_block() {
        let body = r#"{"current": {"temperature_2m": 18.0}}"#;
        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        let conditions = CurrentConditions::from(response);
        assert_eq!(conditions.temperature, Some(18.0));
        assert!(conditions.wind_speed.is_none());
        assert!(conditions.observed_at.is_none());
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let mut config = TripPlannerConfig::default().weather;
        config.base_url = "http://localhost:9999/v1/".to_string();
        let client = OpenMeteoClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }
}
