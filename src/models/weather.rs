//! Current weather conditions and display helpers

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current conditions at a location.
///
/// Every measurement is optional: the provider may omit any of them.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    /// Local time of the observation
    pub observed_at: Option<NaiveDateTime>,
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
    /// Precipitation amount in mm
    pub precipitation: Option<f64>,
}

impl CurrentConditions {
    /// Format temperature with unit, "-" when unknown
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", display_or_dash(self.temperature))
    }

    /// Format wind speed with unit, "-" when unknown
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} m/s", display_or_dash(self.wind_speed))
    }

    /// Format precipitation with unit, "-" when unknown
    #[must_use]
    pub fn format_precipitation(&self) -> String {
        format!("{} mm", display_or_dash(self.precipitation))
    }
}

fn display_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
