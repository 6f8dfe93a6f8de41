//! Fixed asset aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use meridian_shared::types::{AssetCategoryId, FixedAssetId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::AssetError;

/// Depreciation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// Equal monthly charge over the useful life.
    StraightLine,
    /// Fixed fraction of acquisition cost per year.
    DecliningBalance,
}

/// Fixed asset lifecycle status.
///
/// Transitions are one-directional:
/// Draft → Active → {FullyDepreciated | Disposed | WrittenOff}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Registered but not yet in service.
    Draft,
    /// In service and depreciating.
    Active,
    /// Book value has reached salvage value.
    FullyDepreciated,
    /// Sold or otherwise disposed.
    Disposed,
    /// Written off at zero value.
    WrittenOff,
}

impl AssetStatus {
    /// Returns true if the asset can still be disposed or written off.
    #[must_use]
    pub fn is_disposable(&self) -> bool {
        matches!(self, Self::Active | Self::FullyDepreciated)
    }
}

/// A fixed asset with its acquisition data and depreciation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedAsset {
    /// Unique identifier.
    pub id: FixedAssetId,
    /// Human-facing asset number (e.g. "FA-2026-0042"), unique.
    pub asset_number: String,
    /// Display name.
    pub name: String,
    /// The category supplying GL accounts and depreciation policy.
    pub category_id: AssetCategoryId,
    /// When the asset was acquired.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost (strictly positive).
    pub acquisition_cost: Decimal,
    /// Useful life in months (strictly positive).
    pub useful_life_months: u32,
    /// Salvage value (0 ≤ salvage ≤ cost).
    pub salvage_value: Decimal,
    /// Depreciation method.
    pub method: DepreciationMethod,
    /// First date depreciation may be charged.
    pub depreciation_start: NaiveDate,
    /// Depreciation expensed to date.
    pub accumulated_depreciation: Decimal,
    /// Acquisition cost minus accumulated depreciation.
    pub book_value: Decimal,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Optimistic version counter, checked on every write.
    pub version: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a fixed asset.
#[derive(Debug, Clone)]
pub struct NewFixedAsset {
    /// Asset number.
    pub asset_number: String,
    /// Display name.
    pub name: String,
    /// Category.
    pub category_id: AssetCategoryId,
    /// Acquisition date.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    pub acquisition_cost: Decimal,
    /// Useful life in months.
    pub useful_life_months: u32,
    /// Salvage value.
    pub salvage_value: Decimal,
    /// Depreciation method.
    pub method: DepreciationMethod,
    /// First date depreciation may be charged.
    pub depreciation_start: NaiveDate,
}

impl FixedAsset {
    /// Registers a new asset in Draft status.
    ///
    /// # Errors
    ///
    /// Returns `AssetError` when cost, life, or salvage value violate the
    /// invariants (cost > 0, life > 0, 0 ≤ salvage ≤ cost).
    pub fn new(input: NewFixedAsset, now: DateTime<Utc>) -> Result<Self, AssetError> {
        if input.acquisition_cost <= Decimal::ZERO {
            return Err(AssetError::InvalidAcquisitionCost(input.acquisition_cost));
        }
        if input.useful_life_months == 0 {
            return Err(AssetError::InvalidUsefulLife);
        }
        if input.salvage_value < Decimal::ZERO {
            return Err(AssetError::NegativeSalvageValue(input.salvage_value));
        }
        if input.salvage_value > input.acquisition_cost {
            return Err(AssetError::SalvageExceedsCost {
                salvage: input.salvage_value,
                cost: input.acquisition_cost,
            });
        }

        Ok(Self {
            id: FixedAssetId::new(),
            asset_number: input.asset_number,
            name: input.name,
            category_id: input.category_id,
            acquisition_date: input.acquisition_date,
            acquisition_cost: input.acquisition_cost,
            useful_life_months: input.useful_life_months,
            salvage_value: input.salvage_value,
            method: input.method,
            depreciation_start: input.depreciation_start,
            accumulated_depreciation: Decimal::ZERO,
            book_value: input.acquisition_cost,
            status: AssetStatus::Draft,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Places the asset in service (Draft → Active).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the asset is Draft.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<(), AssetError> {
        if self.status != AssetStatus::Draft {
            return Err(AssetError::InvalidStatusTransition {
                from: self.status,
                to: AssetStatus::Active,
            });
        }
        self.status = AssetStatus::Active;
        self.updated_at = now;
        Ok(())
    }

    /// Returns true if depreciation may be charged as of the given date.
    #[must_use]
    pub fn is_depreciable(&self, as_of: NaiveDate) -> bool {
        self.status == AssetStatus::Active
            && self.depreciation_start <= as_of
            && self.book_value > self.salvage_value
    }

    /// Applies a depreciation charge, clamped so the book value never
    /// drops below the salvage value. Reaching the salvage value exactly
    /// transitions the asset to FullyDepreciated.
    ///
    /// Returns the amount actually applied.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the asset is Active.
    pub fn apply_depreciation(
        &mut self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Decimal, AssetError> {
        if self.status != AssetStatus::Active {
            return Err(AssetError::InvalidStatusTransition {
                from: self.status,
                to: AssetStatus::FullyDepreciated,
            });
        }

        let headroom = self.book_value - self.salvage_value;
        let applied = amount.min(headroom).max(Decimal::ZERO);

        self.accumulated_depreciation += applied;
        self.book_value -= applied;
        if self.book_value == self.salvage_value {
            self.status = AssetStatus::FullyDepreciated;
        }
        self.updated_at = now;
        Ok(applied)
    }

    /// Reverts a previously applied depreciation charge (run reversal).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the asset is Active or
    /// FullyDepreciated.
    pub fn revert_depreciation(
        &mut self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), AssetError> {
        if !matches!(self.status, AssetStatus::Active | AssetStatus::FullyDepreciated) {
            return Err(AssetError::InvalidStatusTransition {
                from: self.status,
                to: AssetStatus::Active,
            });
        }

        let reverted = amount.min(self.accumulated_depreciation);
        self.accumulated_depreciation -= reverted;
        self.book_value += reverted;
        if self.status == AssetStatus::FullyDepreciated && self.book_value > self.salvage_value {
            self.status = AssetStatus::Active;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Marks the asset disposed (or written off).
    ///
    /// # Errors
    ///
    /// Returns `AlreadyDisposed` when the asset cannot be disposed.
    pub fn mark_disposed(
        &mut self,
        written_off: bool,
        now: DateTime<Utc>,
    ) -> Result<(), AssetError> {
        if !self.status.is_disposable() {
            return Err(AssetError::AlreadyDisposed(self.id));
        }

        self.status = if written_off {
            AssetStatus::WrittenOff
        } else {
            AssetStatus::Disposed
        };
        self.updated_at = now;
        Ok(())
    }
}
