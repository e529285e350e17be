//! Maps crate-level errors to shoreline_core::AppError for consistent user-facing messages.
//! Each source crate has its own module to keep mappings small and readable.

mod forecast;
mod store;

use shoreline_core::AppError;

/// Conversion into the application-wide error type.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
