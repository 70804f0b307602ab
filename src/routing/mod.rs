//! Road network, shortest-path search and route selection

pub mod graph;
pub mod network;
pub mod selector;
pub mod shortest_path;

pub use graph::{Edge, RoadGraph};
pub use network::{DEFAULT_WEATHER_LOCATION, ORIGIN, WEATHER_ALIASES, weather_key};
pub use selector::{Detour, HIMACHAL_DETOURS, RouteOptions, RouteSelector};
pub use shortest_path::{Metric, RouteResult, shortest_path};
