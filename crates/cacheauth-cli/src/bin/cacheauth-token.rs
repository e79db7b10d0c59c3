//! # CacheAuth Token
//!
//! Prints one IAM auth token for the configured user and cache, signed with
//! AWS credentials from the configured keys or the AWS SDK default chain.
//! Logs go to stderr.

use cacheauth_cli::startup::load_and_init;
use cacheauth_cli::token::generate_token;
use cacheauth_core::AuthResult;
use cacheauth_credentials::aws::SdkCredentialSource;
use chrono::Utc;
use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(code = e.error_code(), "Token generation failed: {}", e);
        eprintln!("cacheauth-token: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> AuthResult<()> {
    let config = load_and_init().await?;
    let source = SdkCredentialSource::from_config(&config.aws, &config.auth.region).await?;

    let token = generate_token(&config.auth, &source, Utc::now()).await?;
    println!("{}", token);
    Ok(())
}
