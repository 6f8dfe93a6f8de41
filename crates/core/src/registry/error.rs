//! Error types for chart of accounts operations.

use meridian_shared::types::AccountId;
use thiserror::Error;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Account code is not a 4-digit numeric string inside a known band.
    #[error("Invalid account code '{0}': expected 4 digits in the 1000-9999 range")]
    InvalidCode(String),

    /// Account not found by ID.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Account not found by code.
    #[error("Account not found for code '{0}'")]
    CodeNotFound(String),

    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// System account codes cannot be changed.
    #[error("Account '{0}' is system-protected, its code cannot be changed")]
    SystemCodeImmutable(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Parent account must be a header account.
    #[error("Parent account {0} is a detail account and cannot hold children")]
    ParentNotHeader(AccountId),

    /// Cannot delete an account that has postings.
    #[error("Cannot delete account '{0}': it has journal postings")]
    HasPostings(String),

    /// Cannot delete an account that has children.
    #[error("Cannot delete account '{0}': it has child accounts")]
    HasChildren(String),

    /// Storage error from the persistence boundary.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RegistryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCode(_) => "INVALID_ACCOUNT_CODE",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::CodeNotFound(_) => "ACCOUNT_CODE_NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::SystemCodeImmutable(_) => "SYSTEM_CODE_IMMUTABLE",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::ParentNotHeader(_) => "PARENT_NOT_HEADER",
            Self::HasPostings(_) => "ACCOUNT_HAS_POSTINGS",
            Self::HasChildren(_) => "ACCOUNT_HAS_CHILDREN",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidCode(_)
            | Self::ParentNotHeader(_)
            | Self::HasPostings(_)
            | Self::HasChildren(_) => 400,
            Self::NotFound(_) | Self::CodeNotFound(_) | Self::ParentNotFound(_) => 404,
            Self::DuplicateCode(_) | Self::SystemCodeImmutable(_) => 409,
            Self::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RegistryError::InvalidCode("12".to_string()).error_code(),
            "INVALID_ACCOUNT_CODE"
        );
        assert_eq!(
            RegistryError::DuplicateCode("1000".to_string()).error_code(),
            "DUPLICATE_ACCOUNT_CODE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(RegistryError::NotFound(AccountId::new()).http_status_code(), 404);
        assert_eq!(
            RegistryError::DuplicateCode("1000".to_string()).http_status_code(),
            409
        );
        assert_eq!(
            RegistryError::HasPostings("1000".to_string()).http_status_code(),
            400
        );
    }
}
