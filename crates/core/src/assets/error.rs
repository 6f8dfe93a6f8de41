//! Error types for fixed asset operations.

use meridian_shared::types::{
    AssetCategoryId, AssetMaintenanceId, DepreciationRunId, FixedAssetId, PeriodRef,
};
use rust_decimal::Decimal;
use thiserror::Error;

use super::asset::AssetStatus;
use super::depreciation::RunStatus;
use crate::journal::JournalError;

/// Errors that can occur during fixed asset operations.
#[derive(Debug, Error)]
pub enum AssetError {
    // ========== Validation Errors ==========
    /// Acquisition cost must be strictly positive.
    #[error("Acquisition cost must be positive, got {0}")]
    InvalidAcquisitionCost(Decimal),

    /// Useful life must be strictly positive.
    #[error("Useful life must be at least 1 month")]
    InvalidUsefulLife,

    /// Salvage value cannot exceed acquisition cost.
    #[error("Salvage value {salvage} exceeds acquisition cost {cost}")]
    SalvageExceedsCost {
        /// The salvage value.
        salvage: Decimal,
        /// The acquisition cost.
        cost: Decimal,
    },

    /// Salvage value cannot be negative.
    #[error("Salvage value cannot be negative, got {0}")]
    NegativeSalvageValue(Decimal),

    /// Disposal value cannot be negative.
    #[error("Disposal value cannot be negative, got {0}")]
    NegativeDisposalValue(Decimal),

    // ========== Not Found ==========
    /// Fixed asset not found.
    #[error("Fixed asset not found: {0}")]
    NotFound(FixedAssetId),

    /// Asset category not found.
    #[error("Asset category not found: {0}")]
    CategoryNotFound(AssetCategoryId),

    /// Maintenance record not found.
    #[error("Maintenance record not found: {0}")]
    MaintenanceNotFound(AssetMaintenanceId),

    /// Depreciation run not found.
    #[error("Depreciation run not found: {0}")]
    RunNotFound(DepreciationRunId),

    // ========== State Errors ==========
    /// Asset number already in use.
    #[error("Asset number '{0}' already exists")]
    DuplicateAssetNumber(String),

    /// Invalid asset status transition.
    #[error("Invalid asset transition from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Current status.
        from: AssetStatus,
        /// Target status.
        to: AssetStatus,
    },

    /// Asset is already disposed or written off.
    #[error("Asset {0} is already disposed or written off")]
    AlreadyDisposed(FixedAssetId),

    /// A depreciation run already exists for the period.
    #[error("Depreciation run already exists for {0}")]
    RunAlreadyExists(PeriodRef),

    /// The run is already posted.
    #[error("Depreciation run {0} is already posted")]
    RunAlreadyPosted(DepreciationRunId),

    /// Invalid run status transition.
    #[error("Invalid run transition from {from:?} to {to:?}")]
    InvalidRunTransition {
        /// Current status.
        from: RunStatus,
        /// Target status.
        to: RunStatus,
    },

    /// Maintenance record already completed.
    #[error("Maintenance record {0} is already completed")]
    MaintenanceAlreadyCompleted(AssetMaintenanceId),

    /// A gain/loss or proceeds line is needed but no account was supplied.
    #[error("Disposal with proceeds requires a proceeds account")]
    MissingProceedsAccount,

    // ========== Concurrency ==========
    /// Stale optimistic version on write.
    #[error("Stale version for asset {asset_id}: expected {expected}, found {actual}")]
    StaleVersion {
        /// The asset.
        asset_id: FixedAssetId,
        /// Version the caller based its update on.
        expected: i64,
        /// Version found in storage.
        actual: i64,
    },

    // ========== Journal ==========
    /// Posting the depreciation or disposal entry failed.
    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    // ========== Storage ==========
    /// Storage error from the persistence boundary.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AssetError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAcquisitionCost(_) => "INVALID_ACQUISITION_COST",
            Self::InvalidUsefulLife => "INVALID_USEFUL_LIFE",
            Self::SalvageExceedsCost { .. } => "SALVAGE_EXCEEDS_COST",
            Self::NegativeSalvageValue(_) => "NEGATIVE_SALVAGE_VALUE",
            Self::NegativeDisposalValue(_) => "NEGATIVE_DISPOSAL_VALUE",
            Self::NotFound(_) => "ASSET_NOT_FOUND",
            Self::CategoryNotFound(_) => "ASSET_CATEGORY_NOT_FOUND",
            Self::MaintenanceNotFound(_) => "MAINTENANCE_NOT_FOUND",
            Self::RunNotFound(_) => "DEPRECIATION_RUN_NOT_FOUND",
            Self::DuplicateAssetNumber(_) => "DUPLICATE_ASSET_NUMBER",
            Self::InvalidStatusTransition { .. } => "INVALID_ASSET_TRANSITION",
            Self::AlreadyDisposed(_) => "ASSET_ALREADY_DISPOSED",
            Self::RunAlreadyExists(_) => "DEPRECIATION_RUN_EXISTS",
            Self::RunAlreadyPosted(_) => "DEPRECIATION_RUN_POSTED",
            Self::InvalidRunTransition { .. } => "INVALID_RUN_TRANSITION",
            Self::MaintenanceAlreadyCompleted(_) => "MAINTENANCE_ALREADY_COMPLETED",
            Self::MissingProceedsAccount => "MISSING_PROCEEDS_ACCOUNT",
            Self::StaleVersion { .. } => "STALE_ASSET_VERSION",
            Self::Journal(err) => err.error_code(),
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidAcquisitionCost(_)
            | Self::InvalidUsefulLife
            | Self::SalvageExceedsCost { .. }
            | Self::NegativeSalvageValue(_)
            | Self::NegativeDisposalValue(_)
            | Self::InvalidStatusTransition { .. }
            | Self::AlreadyDisposed(_)
            | Self::RunAlreadyPosted(_)
            | Self::InvalidRunTransition { .. }
            | Self::MaintenanceAlreadyCompleted(_)
            | Self::MissingProceedsAccount => 400,
            Self::NotFound(_)
            | Self::CategoryNotFound(_)
            | Self::MaintenanceNotFound(_)
            | Self::RunNotFound(_) => 404,
            Self::DuplicateAssetNumber(_)
            | Self::RunAlreadyExists(_)
            | Self::StaleVersion { .. } => 409,
            Self::Journal(err) => err.http_status_code(),
            Self::Storage(_) => 500,
        }
    }

    /// Returns true if this error is retryable after a re-read.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StaleVersion { .. })
    }
}
