//! HTTP client for the multi-day outlook.
//!
//! One GET per call, no retry and no cache. Only `items[0].forecasts` of the
//! response is read.

use crate::types::{ForecastDay, ForecastError, Range};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("Shoreline/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct OutlookResponse {
    #[serde(default)]
    items: Option<Vec<OutlookItem>>,
}

#[derive(Debug, Deserialize)]
struct OutlookItem {
    #[serde(default)]
    forecasts: Option<Vec<RawForecastDay>>,
}

#[derive(Debug, Deserialize)]
struct RawForecastDay {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    forecast: Option<String>,
    temperature: Option<Range>,
    wind: Option<RawWind>,
    relative_humidity: Option<Range>,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: Option<Range>,
}

impl From<RawForecastDay> for ForecastDay {
    fn from(raw: RawForecastDay) -> Self {
        Self {
            date: raw.date.unwrap_or_default(),
            forecast: raw.forecast.unwrap_or_default(),
            temperature: raw.temperature,
            wind_speed: raw.wind.and_then(|w| w.speed),
            relative_humidity: raw.relative_humidity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Arc<Client>,
    endpoint: String,
}

impl ForecastClient {
    /// Build a client for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    /// `ForecastError::Client` if the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ForecastError::Client)?;

        Ok(Self {
            client: Arc::new(client),
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the outlook.
    ///
    /// # Errors
    /// - `ForecastError::Network` on connection failure or timeout.
    /// - `ForecastError::Status` on a non-2xx response.
    /// - `ForecastError::Parse` if the body is not the expected JSON.
    /// - `ForecastError::EmptyForecastData` if there are no forecast days.
    pub async fn fetch(&self) -> Result<Vec<ForecastDay>, ForecastError> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching forecast");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(ForecastError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(ForecastError::Network)?;
        let days = parse_outlook(&body)?;

        tracing::info!(days = days.len(), "Forecast loaded");
        Ok(days)
    }
}

/// Extract forecast days from a response body.
///
/// # Errors
/// `ForecastError::Parse` for malformed JSON, `ForecastError::EmptyForecastData`
/// when `items[0].forecasts` is absent, null or empty. A null `date` or
/// `forecast` on one day reads as empty text and keeps the other days.
pub fn parse_outlook(body: &str) -> Result<Vec<ForecastDay>, ForecastError> {
    let response: OutlookResponse =
        serde_json::from_str(body).map_err(|e| ForecastError::Parse(e.to_string()))?;

    let days: Vec<ForecastDay> = response
        .items
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|item| item.forecasts)
        .map(|days| days.into_iter().map(ForecastDay::from).collect())
        .unwrap_or_default();

    if days.is_empty() {
        return Err(ForecastError::EmptyForecastData);
    }
    Ok(days)
}
