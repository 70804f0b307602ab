//! Data models for the trip planner
//!
//! - Location: named town with geographic coordinates
//! - Weather: current conditions at a location

pub mod location;
pub mod weather;

pub use location::Location;
pub use weather::CurrentConditions;
