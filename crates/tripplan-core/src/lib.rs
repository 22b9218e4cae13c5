pub mod config;
pub mod error;
pub mod http;

pub use config::{Config, PlannerConfig, RetryConfig, ServiceConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};
pub use http::{build_client, send_with_retry, RetryDecision};

use anyhow::Result;

/// Initialize logging for the command-line application.
///
/// Logs go to stderr so that stdout only carries the generated report.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Tripplan core initialized");
    Ok(())
}
