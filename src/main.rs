use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use shoreline_forecast::ForecastClient;
use shoreline_store::{DomainStore, SqliteStorage};
use shoreline_ui::{Controller, Page};

fn main() -> Result<()> {
    shoreline_core::init()?;

    let mut app = shoreline_core::App::new()?;
    app.initialize()?;
    let config = app.shared_config();

    let storage = SqliteStorage::open(config.database_path())
        .with_context(|| format!("Failed to open {}", config.database_path().display()))?
        .with_quota(config.storage.quota_bytes);
    let store = DomainStore::open(Arc::new(storage), config.storage.state_key.clone());
    let mut controller = Controller::new(store, Page::new());

    tracing::info!("Shoreline started");

    if config.forecast.enabled {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("shoreline-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let timeout = Duration::from_secs(config.forecast.timeout_secs);
        match ForecastClient::new(config.forecast.endpoint.clone(), timeout) {
            Ok(client) => {
                controller.request_forecast(runtime.handle(), Arc::new(client));
                if !controller.wait_for_forecast(timeout + Duration::from_secs(1)) {
                    tracing::warn!("Forecast did not settle in time");
                }
            }
            Err(e) => tracing::error!("Forecast unavailable: {}", e),
        }
    }

    if let Some(warning) = controller.storage_warning() {
        tracing::warn!("{}", warning);
    }

    let output = config.output_path();
    std::fs::write(&output, controller.surface().to_html())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Shoreline - Beach Cleanup Crew");
    println!("  Crew members:   {}", controller.store().crew().len());
    println!("  Cleanup events: {}", controller.store().events().len());
    println!("  Forecast:       {:?}", controller.forecast_phase());
    println!("  Page written to {}", output.display());

    app.shutdown()?;

    Ok(())
}
