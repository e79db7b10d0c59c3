//! Startup utilities shared by the binaries.

use cacheauth_config::{AppConfig, ConfigLoader};
use cacheauth_core::{init_logging, AuthError, AuthResult};
use tracing::info;

/// Loads configuration and installs logging as configured.
///
/// # Errors
///
/// `Configuration` when loading, validation or the log filter fails.
pub async fn load_and_init() -> AuthResult<AppConfig> {
    let loader = ConfigLoader::from_default_location()?;
    let config = loader.get().await;

    let format = config.observability.format().ok_or_else(|| {
        AuthError::configuration(format!(
            "unknown log format '{}'",
            config.observability.log_format
        ))
    })?;
    init_logging(&config.observability.log_level, format)?;
    Ok(config)
}

/// Logs the effective settings, without secrets.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment:   {}", config.app.environment);
    info!("User:          {}", config.auth.user_id);
    match config.auth.static_password() {
        Some(_) => info!("Auth mode:     static password"),
        None => info!(
            "Auth mode:     IAM ({} {}, {})",
            config.auth.resource_kind,
            config.auth.resource_id().unwrap_or("-"),
            config.auth.region
        ),
    }
    info!("Cache:         {}", config.cache.url());
    info!("{}", separator);
}
