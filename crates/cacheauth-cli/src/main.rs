//! # CacheAuth Demo
//!
//! Connects to the configured cache over and over, authenticating each new
//! connection with credentials from the configured provider.
//!
//! Settings come from `./config/*.toml` and `CACHEAUTH__*` environment
//! variables (for example `CACHEAUTH__AUTH__USER_ID`).

use cacheauth_cli::demo::DemoApp;
use cacheauth_cli::shutdown::shutdown_signal;
use cacheauth_cli::startup::{load_and_init, print_startup_info};
use cacheauth_core::{AuthResult, SystemClock};
use cacheauth_credentials::aws::SdkCredentialSource;
use cacheauth_credentials::build_credential_provider;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(code = e.error_code(), "Application error: {}", e);
        eprintln!("cacheauth-demo: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> AuthResult<()> {
    let config = load_and_init().await?;

    info!("Starting CacheAuth demo...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    print_startup_info(&config);

    let source = SdkCredentialSource::from_config(&config.aws, &config.auth.region).await?;
    let provider = build_credential_provider(&config.auth, Arc::new(source), Arc::new(SystemClock))?;

    let mut app = DemoApp::new(config.cache.clone(), provider);
    let connections = app.run(shutdown_signal()).await?;

    info!("Demo shutdown complete after {} successful connections", connections);
    Ok(())
}
