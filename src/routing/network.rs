//! The hand-authored Himachal road network

use crate::error::GraphError;
use crate::models::Location;

use super::graph::{Edge, RoadGraph};

/// Where every trip starts
pub const ORIGIN: &str = "Chandigarh";

/// Weather falls back to this town when a destination has no coordinates
pub const DEFAULT_WEATHER_LOCATION: &str = "Manali";

/// Destination labels that are not towns in the network, mapped to the town
/// whose weather stands in for them.
pub const WEATHER_ALIASES: &[(&str, &str)] = &[("Spiti", "Kaza")];

const TOWNS: &[(&str, f64, f64)] = &[
    ("Chandigarh", 30.7333, 76.7794),
    ("Kasauli", 30.898, 76.964),
    ("Shimla", 31.1048, 77.1734),
    ("Solan", 30.908, 77.101),
    ("Kiratpur", 31.021, 76.571),
    ("NerChowk", 31.6, 76.9),
    ("Bhuntar", 31.88, 77.15),
    ("Kullu", 31.957, 77.109),
    ("Manali", 32.2432, 77.1892),
    ("Kasol", 32.01, 77.315),
    ("Dharamshala", 32.219, 76.323),
    ("Dalhousie", 32.537, 75.971),
    ("Mandi", 31.708, 76.932),
    ("Kaza", 32.225, 78.07),
];

// (from, to, km, minutes)
const ROADS: &[(&str, &str, f64, f64)] = &[
    ("Chandigarh", "Kiratpur", 80.0, 110.0),
    ("Chandigarh", "Solan", 45.0, 80.0),
    ("Chandigarh", "Kasauli", 55.0, 90.0),
    ("Chandigarh", "Dharamshala", 240.0, 420.0),
    ("Chandigarh", "Dalhousie", 315.0, 520.0),
    ("Kiratpur", "NerChowk", 130.0, 180.0),
    ("NerChowk", "Mandi", 10.0, 20.0),
    ("NerChowk", "Bhuntar", 70.0, 110.0),
    ("Mandi", "Kullu", 50.0, 90.0),
    ("Bhuntar", "Kullu", 10.0, 20.0),
    ("Bhuntar", "Kasol", 32.0, 70.0),
    ("Kullu", "Manali", 40.0, 80.0),
    ("Solan", "Shimla", 45.0, 100.0),
    ("Shimla", "Kullu", 210.0, 420.0),
    ("Manali", "Kaza", 180.0, 480.0),
];

impl RoadGraph {
    /// The built-in network of hill towns reachable from Chandigarh
    pub fn himachal() -> Result<Self, GraphError> {
        let locations = TOWNS
            .iter()
            .map(|&(name, lat, lon)| Location::new(lat, lon, name))
            .collect();
        let edges = ROADS
            .iter()
            .map(|&(from, to, km, min)| Edge::new(from, to, km, min))
            .collect();
        Self::new(locations, edges)
    }
}

/// Map a destination label to the town used for its weather
#[must_use]
pub fn weather_key(destination: &str) -> &str {
    WEATHER_ALIASES
        .iter()
        .find(|(label, _)| *label == destination)
        .map_or(destination, |&(_, town)| town)
}
