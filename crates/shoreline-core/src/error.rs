//! Centralized error types for Shoreline.
//!
//! Each crate keeps its own precise error enum; the UI layer maps them into
//! [`AppError`] so every failure has a user-facing message and a full
//! `Display` form for logs.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message. Every variant is
/// recoverable: each failure degrades one region of the page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Storage(e) => e.user_message(),
            AppError::Forecast(e) => e.user_message(),
            AppError::InvalidInput(_) => "Please fill in the required fields.",
        }
    }
}

/// Local key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded: {size} bytes over limit of {limit}")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Saved data is corrupt: {0}")]
    Corruption(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => {
                "Unable to access saved data. Changes will last until you close the app."
            }
            StorageError::QuotaExceeded { .. } => {
                "Storage is full. Changes will last until you close the app."
            }
            StorageError::WriteFailed(_) => {
                "Couldn't save your changes. They will last until you close the app."
            }
            StorageError::Corruption(_) => "Saved data was unreadable and has been reset.",
        }
    }
}

/// Forecast service errors.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("No forecast data available")]
    NoData,

    #[error("Forecast request timed out")]
    Timeout,

    #[error("Forecast service unreachable: {0}")]
    Unreachable(String),

    #[error("Forecast API error: {0}")]
    ApiError(String),
}

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::NoData => "No forecast data available.",
            ForecastError::Timeout => {
                "The forecast service took too long to respond. Please try again later."
            }
            ForecastError::Unreachable(_) => {
                "Unable to load weather forecast. Check your connection."
            }
            ForecastError::ApiError(_) => {
                "Unable to load weather forecast. Please try again later."
            }
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_storage_error(self) -> StorageError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_storage_error(self) -> StorageError {
        match &self {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::DiskFull =>
            {
                StorageError::WriteFailed(self.to_string())
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                StorageError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::CannotOpen =>
            {
                StorageError::Unavailable(self.to_string())
            }
            _ => StorageError::WriteFailed(self.to_string()),
        }
    }
}
