//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum TripPlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The road network failed validation at startup
    #[error("Road network error: {source}")]
    Graph {
        #[from]
        source: GraphError,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

/// Reasons a road network is rejected at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("location '{0}' is defined more than once")]
    DuplicateLocation(String),

    #[error("road {from} -> {to} references unknown location '{missing}'")]
    UnknownLocation {
        from: String,
        to: String,
        missing: String,
    },

    #[error("road {from} -> {to} is defined more than once")]
    DuplicateEdge { from: String, to: String },

    #[error("road {from} -> {to} has invalid {field} {value}")]
    InvalidWeight {
        from: String,
        to: String,
        field: &'static str,
        value: f64,
    },
}

impl TripPlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripPlannerError::config("bad port");
        assert!(matches!(config_err, TripPlannerError::Config { .. }));

        let validation_err = TripPlannerError::validation("negative days");
        assert!(matches!(validation_err, TripPlannerError::Validation { .. }));
    }

    #[test]
    fn test_graph_error_conversion() {
        let graph_err = GraphError::DuplicateLocation("Shimla".to_string());
        let err: TripPlannerError = graph_err.into();
        assert!(matches!(err, TripPlannerError::Graph { .. }));
        assert!(err.to_string().contains("Shimla"));
    }
}
