use shoreline_core::{AppError, ForecastError as CoreForecastError};
use shoreline_forecast::ForecastError;

use super::IntoAppError;

impl IntoAppError for ForecastError {
    fn into_app_error(self) -> AppError {
        let err = match self {
            ForecastError::Client(e) => CoreForecastError::Unreachable(e.to_string()),
            ForecastError::Network(e) if e.is_timeout() => CoreForecastError::Timeout,
            ForecastError::Network(e) => CoreForecastError::Unreachable(e.to_string()),
            ForecastError::Status(status) => {
                CoreForecastError::ApiError(format!("endpoint returned status {status}"))
            }
            ForecastError::Parse(msg) => CoreForecastError::ApiError(msg),
            ForecastError::EmptyForecastData => CoreForecastError::NoData,
        };
        AppError::Forecast(err)
    }
}
