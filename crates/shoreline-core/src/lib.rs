pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{Config, ForecastConfig, StorageConfig, UiConfig, ValidationResult};
pub use error::{AppError, ForecastError, RusqliteErrorExt, StorageError};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init() -> Result<()> {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Shoreline core initialized");
    }
    Ok(())
}
