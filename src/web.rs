use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::{self, AppState};
use crate::config::TripPlannerConfig;
use crate::planner::TripPlanner;
use crate::weather::OpenMeteoClient;

/// API under `/api`, everything else served from `static_dir`
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}

/// Build the application state from configuration
pub fn build_state(config: &TripPlannerConfig) -> Result<AppState> {
    let planner = TripPlanner::himachal(config.trip.origin.clone())?;

    Ok(AppState {
        planner: Arc::new(planner),
        weather: Arc::new(OpenMeteoClient::new(&config.weather)?),
        defaults: Arc::new(config.trip.clone()),
    })
}

pub async fn run(config: &TripPlannerConfig) -> Result<()> {
    let state = build_state(config)?;
    let app = app(state, &config.server.static_dir);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Travel Planner running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
