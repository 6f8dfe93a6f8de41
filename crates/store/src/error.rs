//! Repository error type and conversions into the domain errors.

use meridian_core::assets::AssetError;
use meridian_core::balance::BalanceError;
use meridian_core::fiscal::FiscalError;
use meridian_core::journal::JournalError;
use meridian_core::reconciliation::ReconciliationError;
use meridian_core::registry::RegistryError;
use meridian_shared::types::FixedAssetId;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Optimistic version check failed; the caller must re-read and retry.
    #[error("Stale version for {entity} {id}: expected {expected}, found {actual}")]
    StaleVersion {
        /// Entity kind (e.g. "fixed_asset").
        entity: &'static str,
        /// Entity id.
        id: Uuid,
        /// Version the caller based its write on.
        expected: i64,
        /// Version found in storage.
        actual: i64,
    },

    /// Underlying storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RepoError> for RegistryError {
    fn from(err: RepoError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<RepoError> for JournalError {
    fn from(err: RepoError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<RepoError> for FiscalError {
    fn from(err: RepoError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<RepoError> for BalanceError {
    fn from(err: RepoError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<RepoError> for ReconciliationError {
    fn from(err: RepoError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<RepoError> for AssetError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::StaleVersion {
                id,
                expected,
                actual,
                ..
            } => Self::StaleVersion {
                asset_id: FixedAssetId::from_uuid(id),
                expected,
                actual,
            },
            RepoError::Storage(message) => Self::Storage(message),
        }
    }
}
