//! Bootstrap utilities.
//!
//! Shared initialization code for processes embedding the review service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LOG_ENV_VAR};
use crate::services::ReviewService;

/// Initialize tracing with the POS_REVIEWS_LOG environment variable.
///
/// Defaults to "info" level if POS_REVIEWS_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load configuration and build a ready review service.
///
/// `config_path` is an optional YAML file layered over `config.yaml` and
/// under environment overrides.
pub async fn bootstrap(
    config_path: Option<&str>,
) -> Result<ReviewService, Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    ReviewService::from_config(&config).await
}
