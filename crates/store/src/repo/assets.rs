//! Fixed asset, category, maintenance, and depreciation run repository
//! interfaces.

use async_trait::async_trait;
use meridian_core::assets::{
    AssetCategory, AssetMaintenance, AssetStatus, DepreciationRun, FixedAsset,
};
use meridian_shared::types::{
    AssetCategoryId, AssetMaintenanceId, DepreciationRunId, FixedAssetId, PeriodRef,
};

use crate::error::RepoError;

/// Persistence operations for fixed assets.
///
/// Assets are mutable aggregates with concurrent writers, so updates are
/// guarded by an optimistic version check.
#[async_trait]
pub trait FixedAssetRepository: Send + Sync {
    /// Finds an asset by id.
    async fn find_by_id(&self, id: FixedAssetId) -> Result<Option<FixedAsset>, RepoError>;

    /// Finds an asset by its asset number.
    async fn find_by_number(&self, asset_number: &str) -> Result<Option<FixedAsset>, RepoError>;

    /// Lists assets with the given status.
    async fn list_by_status(&self, status: AssetStatus) -> Result<Vec<FixedAsset>, RepoError>;

    /// Inserts a new asset.
    async fn insert(&self, asset: &FixedAsset) -> Result<(), RepoError>;

    /// Updates an asset when the stored version equals `expected_version`;
    /// on success the stored version becomes `expected_version + 1`.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::StaleVersion` when the stored version differs,
    /// leaving state unchanged. The caller must re-read and retry.
    async fn update(&self, asset: &FixedAsset, expected_version: i64) -> Result<(), RepoError>;
}

/// Persistence operations for asset categories.
#[async_trait]
pub trait AssetCategoryRepository: Send + Sync {
    /// Finds a category by id.
    async fn find_by_id(&self, id: AssetCategoryId) -> Result<Option<AssetCategory>, RepoError>;

    /// Lists all categories.
    async fn list(&self) -> Result<Vec<AssetCategory>, RepoError>;

    /// Inserts or updates a category.
    async fn save(&self, category: &AssetCategory) -> Result<(), RepoError>;
}

/// Persistence operations for maintenance records.
#[async_trait]
pub trait AssetMaintenanceRepository: Send + Sync {
    /// Finds a record by id.
    async fn find_by_id(
        &self,
        id: AssetMaintenanceId,
    ) -> Result<Option<AssetMaintenance>, RepoError>;

    /// Lists maintenance records for an asset.
    async fn list_for_asset(
        &self,
        asset_id: FixedAssetId,
    ) -> Result<Vec<AssetMaintenance>, RepoError>;

    /// Inserts or updates a record.
    async fn save(&self, record: &AssetMaintenance) -> Result<(), RepoError>;
}

/// Persistence operations for depreciation runs.
///
/// A run and its lines are one aggregate; `save` writes both as a single
/// unit.
#[async_trait]
pub trait DepreciationRunRepository: Send + Sync {
    /// Finds a run by id.
    async fn find_by_id(&self, id: DepreciationRunId)
        -> Result<Option<DepreciationRun>, RepoError>;

    /// Finds the latest run for a period.
    async fn find_by_period(&self, period: PeriodRef)
        -> Result<Option<DepreciationRun>, RepoError>;

    /// Inserts or updates a run with its lines, atomically.
    async fn save(&self, run: &DepreciationRun) -> Result<(), RepoError>;
}
