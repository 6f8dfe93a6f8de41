//! Asset maintenance records.

use chrono::{DateTime, NaiveDate, Utc};
use meridian_shared::types::{AssetMaintenanceId, FixedAssetId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::AssetError;

/// A maintenance event against a fixed asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMaintenance {
    /// Unique identifier.
    pub id: AssetMaintenanceId,
    /// The asset maintained.
    pub asset_id: FixedAssetId,
    /// When the maintenance is scheduled or was performed.
    pub maintenance_date: NaiveDate,
    /// What was (or will be) done.
    pub description: String,
    /// Maintenance cost.
    pub cost: Decimal,
    /// Whether the work is finished.
    pub completed: bool,
    /// When the work was finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl AssetMaintenance {
    /// Records a new (open) maintenance event.
    #[must_use]
    pub fn new(
        asset_id: FixedAssetId,
        maintenance_date: NaiveDate,
        description: impl Into<String>,
        cost: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AssetMaintenanceId::new(),
            asset_id,
            maintenance_date,
            description: description.into(),
            cost,
            completed: false,
            completed_at: None,
            created_at: now,
        }
    }

    /// Marks the maintenance completed.
    ///
    /// # Errors
    ///
    /// Returns `MaintenanceAlreadyCompleted` when already completed.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), AssetError> {
        if self.completed {
            return Err(AssetError::MaintenanceAlreadyCompleted(self.id));
        }
        self.completed = true;
        self.completed_at = Some(now);
        Ok(())
    }
}
