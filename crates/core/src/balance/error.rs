//! Error types for balance calculations.

use meridian_shared::types::AccountId;
use thiserror::Error;

/// Errors that can occur while deriving balances.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// Activity references an account missing from the registry.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Storage error from the persistence boundary.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BalanceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AccountNotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }
}
