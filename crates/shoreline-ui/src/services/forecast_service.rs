//! Forecast backend: async fetching.
//! Network work runs on the tokio runtime; results are sent back via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use shoreline_forecast::{ForecastClient, ForecastDay, ForecastError};

/// Messages sent from async operations back to the controller
#[derive(Debug)]
pub enum ForecastMessage {
    /// Result of a fetch, tagged with the request generation that started it
    FetchDone {
        generation: u64,
        result: Result<Vec<ForecastDay>, ForecastError>,
    },
}

/// Request an outlook fetch on `runtime`.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &Sender<ForecastMessage>,
    runtime: &tokio::runtime::Handle,
    client: Arc<ForecastClient>,
    generation: u64,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.fetch().await;
        if tx
            .send(ForecastMessage::FetchDone { generation, result })
            .is_err()
        {
            tracing::debug!(generation, "Forecast result dropped, controller is gone");
        }
    });
}
