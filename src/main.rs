use std::path::PathBuf;

use anyhow::Result;
use tripplanner::{TripPlannerConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = TripPlannerConfig::load_from_path(config_path)?;

    logging::init(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    web::run(&config).await
}
