//! Depreciation and fixed asset service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use meridian_core::assets::{
    compute_charge, compute_disposal, disposal_lines, AssetCategory, AssetError,
    AssetMaintenance, DepreciationCharge, DepreciationRun, DisposalAccounts, DisposalOutcome,
    FixedAsset, NewFixedAsset, RunStatus,
};
use meridian_core::assets::AssetStatus;
use meridian_core::journal::{CreateJournalEntryInput, Direction, JournalLineInput};
use meridian_shared::config::DepreciationConfig;
use meridian_shared::types::{
    AccountId, AssetCategoryId, AssetMaintenanceId, DepreciationRunId, FixedAssetId,
    JournalEntryId, PeriodRef, UserId,
};
use rust_decimal::Decimal;

use super::journal::JournalService;
use crate::repo::{
    AssetCategoryRepository, AssetMaintenanceRepository, DepreciationRunRepository,
    FixedAssetRepository,
};

/// Read-only preview of a period's depreciation.
#[derive(Debug, Clone)]
pub struct DepreciationPreview {
    /// The period previewed.
    pub period: PeriodRef,
    /// Per-asset charges.
    pub charges: Vec<DepreciationCharge>,
    /// Sum of charge amounts.
    pub total: Decimal,
}

/// Input for disposing an asset.
#[derive(Debug, Clone)]
pub struct DisposeAssetInput {
    /// The disposal date.
    pub disposal_date: NaiveDate,
    /// Proceeds received (must be non-negative).
    pub disposal_value: Decimal,
    /// Account receiving the proceeds; required when the value is
    /// positive and an entry is requested.
    pub proceeds_account_id: Option<AccountId>,
    /// Whether to generate and post the disposal journal entry.
    pub create_entry: bool,
    /// The asset version this disposal was decided against.
    pub expected_version: i64,
    /// The acting user.
    pub by: UserId,
}

/// The persisted result of a disposal.
#[derive(Debug, Clone)]
pub struct DisposalReceipt {
    /// The financial outcome.
    pub outcome: DisposalOutcome,
    /// The posted journal entry, when one was requested.
    pub journal_entry_id: Option<JournalEntryId>,
}

/// Depreciation and fixed asset service.
pub struct DepreciationService {
    assets: Arc<dyn FixedAssetRepository>,
    categories: Arc<dyn AssetCategoryRepository>,
    maintenance: Arc<dyn AssetMaintenanceRepository>,
    runs: Arc<dyn DepreciationRunRepository>,
    journal: Arc<JournalService>,
    config: DepreciationConfig,
}

impl DepreciationService {
    /// Creates a new depreciation service.
    #[must_use]
    pub fn new(
        assets: Arc<dyn FixedAssetRepository>,
        categories: Arc<dyn AssetCategoryRepository>,
        maintenance: Arc<dyn AssetMaintenanceRepository>,
        runs: Arc<dyn DepreciationRunRepository>,
        journal: Arc<JournalService>,
        config: DepreciationConfig,
    ) -> Self {
        Self {
            assets,
            categories,
            maintenance,
            runs,
            journal,
            config,
        }
    }

    /// Registers a new asset in Draft status.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound`, `DuplicateAssetNumber`, or the
    /// aggregate's invariant violations.
    pub async fn register_asset(&self, input: NewFixedAsset) -> Result<FixedAsset, AssetError> {
        self.get_category(input.category_id).await?;

        if self
            .assets
            .find_by_number(&input.asset_number)
            .await?
            .is_some()
        {
            return Err(AssetError::DuplicateAssetNumber(input.asset_number));
        }

        let asset = FixedAsset::new(input, Utc::now())?;
        self.assets.insert(&asset).await?;

        tracing::info!(asset_id = %asset.id, asset_number = %asset.asset_number, "asset registered");
        Ok(asset)
    }

    /// Places an asset in service.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the asset is Draft.
    pub async fn activate_asset(&self, id: FixedAssetId) -> Result<FixedAsset, AssetError> {
        let mut asset = self.get_asset(id).await?;
        let version = asset.version;
        asset.activate(Utc::now())?;
        self.assets.update(&asset, version).await?;
        asset.version = version + 1;
        Ok(asset)
    }

    /// Fetches an asset by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn get_asset(&self, id: FixedAssetId) -> Result<FixedAsset, AssetError> {
        self.assets
            .find_by_id(id)
            .await?
            .ok_or(AssetError::NotFound(id))
    }

    /// Computes the period's depreciation without persisting anything.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` when an asset references an unknown
    /// category.
    pub async fn preview(&self, period: PeriodRef) -> Result<DepreciationPreview, AssetError> {
        let charges = self.compute_charges(period).await?;
        let total = charges.iter().map(|charge| charge.amount).sum();
        Ok(DepreciationPreview {
            period,
            charges,
            total,
        })
    }

    /// Calculates the period's depreciation, applying the charges to the
    /// assets and persisting the run.
    ///
    /// A period can be calculated once; pass `recalculate` to replace a
    /// prior un-posted run (its charges are reverted first). A posted run
    /// must be reversed before recalculating.
    ///
    /// # Errors
    ///
    /// Returns `RunAlreadyExists` / `RunAlreadyPosted` per the rules
    /// above.
    pub async fn calculate(
        &self,
        period: PeriodRef,
        by: UserId,
        recalculate: bool,
    ) -> Result<DepreciationRun, AssetError> {
        if let Some(existing) = self.runs.find_by_period(period).await? {
            match existing.status {
                RunStatus::Posted => {
                    return Err(if recalculate {
                        AssetError::RunAlreadyPosted(existing.id)
                    } else {
                        AssetError::RunAlreadyExists(period)
                    });
                }
                RunStatus::Calculated => {
                    if !recalculate {
                        return Err(AssetError::RunAlreadyExists(period));
                    }
                    self.revert_run_charges(&existing).await?;
                }
                RunStatus::Reversed => {}
            }
        }

        let charges = self.compute_charges(period).await?;
        for charge in &charges {
            let mut asset = self.get_asset(charge.asset_id).await?;
            let version = asset.version;
            asset.apply_depreciation(charge.amount, Utc::now())?;
            self.assets.update(&asset, version).await?;
        }

        let run = DepreciationRun::new(period, charges, by, Utc::now());
        self.runs.save(&run).await?;

        tracing::info!(
            run_id = %run.id,
            period = %period,
            total = %run.total_amount,
            assets = run.lines.len(),
            "depreciation calculated"
        );
        Ok(run)
    }

    /// Posts a calculated run: one balanced journal entry (debit
    /// depreciation expense, credit accumulated depreciation, grouped per
    /// category), posted immediately.
    ///
    /// # Errors
    ///
    /// Returns `RunAlreadyPosted` for posted runs and journal errors when
    /// posting fails.
    pub async fn post_run(
        &self,
        run_id: DepreciationRunId,
        by: UserId,
    ) -> Result<DepreciationRun, AssetError> {
        let mut run = self.get_run(run_id).await?;
        match run.status {
            RunStatus::Calculated => {}
            RunStatus::Posted => return Err(AssetError::RunAlreadyPosted(run.id)),
            RunStatus::Reversed => {
                return Err(AssetError::InvalidRunTransition {
                    from: run.status,
                    to: RunStatus::Posted,
                })
            }
        }

        let mut per_category: HashMap<AssetCategoryId, Decimal> = HashMap::new();
        for line in &run.lines {
            *per_category.entry(line.category_id).or_insert(Decimal::ZERO) += line.amount;
        }
        let mut category_ids: Vec<AssetCategoryId> = per_category.keys().copied().collect();
        category_ids.sort_by_key(|id| id.into_inner());

        let mut lines = Vec::with_capacity(category_ids.len() * 2);
        for category_id in category_ids {
            let category = self.get_category(category_id).await?;
            let amount = per_category[&category_id];
            lines.push(JournalLineInput {
                account_id: category.depreciation_expense_account_id,
                direction: Direction::Debit,
                amount,
                memo: Some(format!("Depreciation - {}", category.name)),
            });
            lines.push(JournalLineInput {
                account_id: category.accumulated_depreciation_account_id,
                direction: Direction::Credit,
                amount,
                memo: Some(format!("Accumulated depreciation - {}", category.name)),
            });
        }

        let entry = self
            .journal
            .create_entry(CreateJournalEntryInput {
                entry_date: run.period.last_day(),
                description: format!("Depreciation for {}", run.period),
                reference: None,
                notes: None,
                source_service: Some("depreciation".to_string()),
                source_reference: Some(run.id.to_string()),
                lines,
                created_by: by,
            })
            .await?;
        let entry = self.journal.post_entry(entry.id, by).await?;

        run.mark_posted(entry.id, by, Utc::now())?;
        self.runs.save(&run).await?;

        tracing::info!(
            run_id = %run.id,
            entry_id = %entry.id,
            total = %run.total_amount,
            "depreciation run posted"
        );
        Ok(run)
    }

    /// Reverses a posted run: voids its journal entry and restores each
    /// asset's accumulated depreciation and status.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the run is Posted.
    pub async fn reverse_run(
        &self,
        run_id: DepreciationRunId,
        by: UserId,
        reason: &str,
    ) -> Result<DepreciationRun, AssetError> {
        let mut run = self.get_run(run_id).await?;
        if run.status != RunStatus::Posted {
            return Err(AssetError::InvalidRunTransition {
                from: run.status,
                to: RunStatus::Reversed,
            });
        }

        let entry_id = run
            .journal_entry_id
            .ok_or_else(|| AssetError::Storage("posted run has no journal entry".to_string()))?;
        self.journal.void_entry(entry_id, by, reason).await?;

        self.revert_run_charges(&run).await?;

        run.mark_reversed(by, Utc::now())?;
        self.runs.save(&run).await?;

        tracing::info!(run_id = %run.id, reason, "depreciation run reversed");
        Ok(run)
    }

    /// Disposes an asset, optionally posting the disposal entry.
    ///
    /// # Errors
    ///
    /// Returns `StaleVersion` when the caller's version is outdated,
    /// `NegativeDisposalValue` / `AlreadyDisposed` per the domain rules,
    /// and journal errors when the entry fails to post.
    pub async fn dispose(
        &self,
        asset_id: FixedAssetId,
        input: DisposeAssetInput,
    ) -> Result<DisposalReceipt, AssetError> {
        self.dispose_inner(asset_id, input, false).await
    }

    /// Writes an asset off: a disposal at zero value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::dispose`].
    pub async fn write_off(
        &self,
        asset_id: FixedAssetId,
        disposal_date: NaiveDate,
        expected_version: i64,
        create_entry: bool,
        by: UserId,
    ) -> Result<DisposalReceipt, AssetError> {
        self.dispose_inner(
            asset_id,
            DisposeAssetInput {
                disposal_date,
                disposal_value: Decimal::ZERO,
                proceeds_account_id: None,
                create_entry,
                expected_version,
                by,
            },
            true,
        )
        .await
    }

    /// Records an open maintenance event for an asset.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown assets.
    pub async fn record_maintenance(
        &self,
        asset_id: FixedAssetId,
        maintenance_date: NaiveDate,
        description: &str,
        cost: Decimal,
    ) -> Result<AssetMaintenance, AssetError> {
        self.get_asset(asset_id).await?;

        let record =
            AssetMaintenance::new(asset_id, maintenance_date, description, cost, Utc::now());
        self.maintenance.save(&record).await?;
        Ok(record)
    }

    /// Completes a maintenance record.
    ///
    /// # Errors
    ///
    /// Returns `MaintenanceNotFound` for unknown records and
    /// `MaintenanceAlreadyCompleted` when already done.
    pub async fn complete_maintenance(
        &self,
        id: AssetMaintenanceId,
    ) -> Result<AssetMaintenance, AssetError> {
        let mut record = self
            .maintenance
            .find_by_id(id)
            .await?
            .ok_or(AssetError::MaintenanceNotFound(id))?;
        record.complete(Utc::now())?;
        self.maintenance.save(&record).await?;
        Ok(record)
    }

    async fn dispose_inner(
        &self,
        asset_id: FixedAssetId,
        input: DisposeAssetInput,
        written_off: bool,
    ) -> Result<DisposalReceipt, AssetError> {
        let mut asset = self.get_asset(asset_id).await?;
        if asset.version != input.expected_version {
            return Err(AssetError::StaleVersion {
                asset_id,
                expected: input.expected_version,
                actual: asset.version,
            });
        }

        let outcome = compute_disposal(&asset, input.disposal_value, input.disposal_date)?;

        let journal_entry_id = if input.create_entry {
            let category = self.get_category(asset.category_id).await?;
            let lines = disposal_lines(
                &outcome,
                &DisposalAccounts {
                    asset_account_id: category.asset_account_id,
                    accumulated_depreciation_account_id: category
                        .accumulated_depreciation_account_id,
                    gain_loss_account_id: category.disposal_gain_loss_account_id,
                    proceeds_account_id: input.proceeds_account_id,
                },
            )?;

            let action = if written_off { "Write-off" } else { "Disposal" };
            let entry = self
                .journal
                .create_entry(CreateJournalEntryInput {
                    entry_date: input.disposal_date,
                    description: format!("{action} of {}", asset.name),
                    reference: Some(asset.asset_number.clone()),
                    notes: None,
                    source_service: Some("fixed-assets".to_string()),
                    source_reference: Some(asset.id.to_string()),
                    lines,
                    created_by: input.by,
                })
                .await?;
            let entry = self.journal.post_entry(entry.id, input.by).await?;
            Some(entry.id)
        } else {
            None
        };

        asset.mark_disposed(written_off, Utc::now())?;
        self.assets.update(&asset, input.expected_version).await?;

        tracing::info!(
            asset_id = %asset_id,
            disposal_value = %outcome.disposal_value,
            gain_loss = %outcome.gain_loss,
            written_off,
            "asset disposed"
        );
        Ok(DisposalReceipt {
            outcome,
            journal_entry_id,
        })
    }

    /// Reverts the asset-side effects of a run's charges.
    async fn revert_run_charges(&self, run: &DepreciationRun) -> Result<(), AssetError> {
        for line in &run.lines {
            let mut asset = self.get_asset(line.asset_id).await?;
            let version = asset.version;
            asset.revert_depreciation(line.amount, Utc::now())?;
            self.assets.update(&asset, version).await?;
        }
        Ok(())
    }

    /// Computes the clamped charge for every eligible Active asset, as of
    /// the period's last day.
    async fn compute_charges(
        &self,
        period: PeriodRef,
    ) -> Result<Vec<DepreciationCharge>, AssetError> {
        let as_of = period.last_day();
        let assets = self.assets.list_by_status(AssetStatus::Active).await?;

        let mut rates: HashMap<AssetCategoryId, Decimal> = HashMap::new();
        let mut charges = Vec::new();

        for asset in assets {
            let rate = if let Some(rate) = rates.get(&asset.category_id).copied() {
                rate
            } else {
                let category = self.get_category(asset.category_id).await?;
                let rate = category.declining_rate_or(self.config.default_declining_rate);
                rates.insert(asset.category_id, rate);
                rate
            };

            if let Some(charge) = compute_charge(&asset, rate, as_of) {
                charges.push(charge);
            }
        }

        Ok(charges)
    }

    async fn get_category(&self, id: AssetCategoryId) -> Result<AssetCategory, AssetError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(AssetError::CategoryNotFound(id))
    }

    async fn get_run(&self, id: DepreciationRunId) -> Result<DepreciationRun, AssetError> {
        self.runs
            .find_by_id(id)
            .await?
            .ok_or(AssetError::RunNotFound(id))
    }
}
