use shoreline_core::{AppError, StorageError};
use shoreline_store::{PersistenceError, StoreError};

use super::IntoAppError;

impl IntoAppError for StoreError {
    fn into_app_error(self) -> AppError {
        match self {
            StoreError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}

impl IntoAppError for PersistenceError {
    fn into_app_error(self) -> AppError {
        match self {
            PersistenceError::CorruptPersistedState(e) => {
                AppError::Storage(StorageError::Corruption(e.to_string()))
            }
            PersistenceError::StorageRead(e) | PersistenceError::StorageWrite(e) => {
                AppError::Storage(e)
            }
            PersistenceError::Serialize(e) => {
                AppError::Storage(StorageError::WriteFailed(e.to_string()))
            }
        }
    }
}
