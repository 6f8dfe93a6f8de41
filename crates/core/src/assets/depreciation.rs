//! Depreciation calculation and runs.

use chrono::{DateTime, NaiveDate, Utc};
use meridian_shared::types::{
    AssetCategoryId, DepreciationRunId, FixedAssetId, JournalEntryId, PeriodRef, UserId,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::asset::{DepreciationMethod, FixedAsset};
use super::error::AssetError;

/// Computes the nominal monthly depreciation charge for an asset.
///
/// - StraightLine: (cost - salvage) / useful life months
/// - DecliningBalance: cost × annual rate / 12
///
/// Amounts are rounded to 2 decimal places with banker's rounding. The
/// result is not clamped; [`FixedAsset::apply_depreciation`] clamps at the
/// salvage value.
#[must_use]
pub fn monthly_depreciation(
    method: DepreciationMethod,
    acquisition_cost: Decimal,
    salvage_value: Decimal,
    useful_life_months: u32,
    annual_declining_rate: Decimal,
) -> Decimal {
    let raw = match method {
        DepreciationMethod::StraightLine => {
            (acquisition_cost - salvage_value) / Decimal::from(useful_life_months)
        }
        DepreciationMethod::DecliningBalance => {
            acquisition_cost * annual_declining_rate / Decimal::from(12)
        }
    };
    raw.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// One asset's depreciation charge for a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationCharge {
    /// The asset.
    pub asset_id: FixedAssetId,
    /// The asset's category (drives account wiring at posting).
    pub category_id: AssetCategoryId,
    /// Charge amount, clamped at the salvage value.
    pub amount: Decimal,
    /// Book value before the charge.
    pub book_value_before: Decimal,
    /// Book value after the charge.
    pub book_value_after: Decimal,
    /// Whether the charge brings the asset to its salvage value.
    pub fully_depreciates: bool,
}

/// Computes the clamped depreciation charge for an asset as of a date.
///
/// Returns `None` when the asset is not depreciable: not Active, its
/// depreciation start date has not passed, or its book value is already at
/// (or below) the salvage value.
#[must_use]
pub fn compute_charge(
    asset: &FixedAsset,
    annual_declining_rate: Decimal,
    as_of: NaiveDate,
) -> Option<DepreciationCharge> {
    if !asset.is_depreciable(as_of) {
        return None;
    }

    let nominal = monthly_depreciation(
        asset.method,
        asset.acquisition_cost,
        asset.salvage_value,
        asset.useful_life_months,
        annual_declining_rate,
    );

    let headroom = asset.book_value - asset.salvage_value;
    let amount = nominal.min(headroom);
    if amount <= Decimal::ZERO {
        return None;
    }

    let book_value_after = asset.book_value - amount;
    Some(DepreciationCharge {
        asset_id: asset.id,
        category_id: asset.category_id,
        amount,
        book_value_before: asset.book_value,
        book_value_after,
        fully_depreciates: book_value_after == asset.salvage_value,
    })
}

/// Depreciation run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Charges computed and applied to assets; no journal entry yet.
    Calculated,
    /// Journal entry created and posted.
    Posted,
    /// Posted entry voided and asset state restored.
    Reversed,
}

/// One asset's line within a depreciation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationRunLine {
    /// The asset.
    pub asset_id: FixedAssetId,
    /// The asset's category at calculation time.
    pub category_id: AssetCategoryId,
    /// Charge amount.
    pub amount: Decimal,
    /// Book value before the charge.
    pub book_value_before: Decimal,
    /// Book value after the charge.
    pub book_value_after: Decimal,
}

impl From<DepreciationCharge> for DepreciationRunLine {
    fn from(charge: DepreciationCharge) -> Self {
        Self {
            asset_id: charge.asset_id,
            category_id: charge.category_id,
            amount: charge.amount,
            book_value_before: charge.book_value_before,
            book_value_after: charge.book_value_after,
        }
    }
}

/// A depreciation run for one fiscal period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationRun {
    /// Unique identifier.
    pub id: DepreciationRunId,
    /// The fiscal period.
    pub period: PeriodRef,
    /// Current status.
    pub status: RunStatus,
    /// Per-asset charges.
    pub lines: Vec<DepreciationRunLine>,
    /// Sum of line amounts.
    pub total_amount: Decimal,
    /// The journal entry created at posting.
    pub journal_entry_id: Option<JournalEntryId>,
    /// Who calculated the run.
    pub calculated_by: UserId,
    /// When the run was calculated.
    pub calculated_at: DateTime<Utc>,
    /// Who posted the run.
    pub posted_by: Option<UserId>,
    /// When the run was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// Who reversed the run.
    pub reversed_by: Option<UserId>,
    /// When the run was reversed.
    pub reversed_at: Option<DateTime<Utc>>,
}

impl DepreciationRun {
    /// Creates a calculated run from charges.
    #[must_use]
    pub fn new(
        period: PeriodRef,
        charges: Vec<DepreciationCharge>,
        calculated_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        let lines: Vec<DepreciationRunLine> =
            charges.into_iter().map(DepreciationRunLine::from).collect();
        let total_amount = lines.iter().map(|line| line.amount).sum();

        Self {
            id: DepreciationRunId::new(),
            period,
            status: RunStatus::Calculated,
            lines,
            total_amount,
            journal_entry_id: None,
            calculated_by,
            calculated_at: now,
            posted_by: None,
            posted_at: None,
            reversed_by: None,
            reversed_at: None,
        }
    }

    /// Marks the run posted with its journal entry.
    ///
    /// # Errors
    ///
    /// Returns `RunAlreadyPosted` for posted runs and an invalid-transition
    /// error for reversed ones.
    pub fn mark_posted(
        &mut self,
        journal_entry_id: JournalEntryId,
        by: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), AssetError> {
        match self.status {
            RunStatus::Calculated => {}
            RunStatus::Posted => return Err(AssetError::RunAlreadyPosted(self.id)),
            RunStatus::Reversed => {
                return Err(AssetError::InvalidRunTransition {
                    from: self.status,
                    to: RunStatus::Posted,
                })
            }
        }

        self.status = RunStatus::Posted;
        self.journal_entry_id = Some(journal_entry_id);
        self.posted_by = Some(by);
        self.posted_at = Some(now);
        Ok(())
    }

    /// Marks a posted run reversed.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the run is Posted.
    pub fn mark_reversed(&mut self, by: UserId, now: DateTime<Utc>) -> Result<(), AssetError> {
        if self.status != RunStatus::Posted {
            return Err(AssetError::InvalidRunTransition {
                from: self.status,
                to: RunStatus::Reversed,
            });
        }

        self.status = RunStatus::Reversed;
        self.reversed_by = Some(by);
        self.reversed_at = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::asset::{AssetStatus, NewFixedAsset};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn asset(
        cost: Decimal,
        salvage: Decimal,
        life: u32,
        method: DepreciationMethod,
    ) -> FixedAsset {
        let mut asset = FixedAsset::new(
            NewFixedAsset {
                asset_number: "FA-0001".to_string(),
                name: "Press".to_string(),
                category_id: AssetCategoryId::new(),
                acquisition_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                acquisition_cost: cost,
                useful_life_months: life,
                salvage_value: salvage,
                method,
                depreciation_start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            },
            Utc::now(),
        )
        .unwrap();
        asset.activate(Utc::now()).unwrap();
        asset
    }

    #[test]
    fn test_straight_line_monthly() {
        // (1,200,000 - 120,000) / 36 = 30,000
        let monthly = monthly_depreciation(
            DepreciationMethod::StraightLine,
            dec!(1_200_000),
            dec!(120_000),
            36,
            dec!(0.40),
        );
        assert_eq!(monthly, dec!(30_000));
    }

    #[test]
    fn test_straight_line_rounds_bankers() {
        // 1000 / 12 = 83.333... → 83.33
        let monthly = monthly_depreciation(
            DepreciationMethod::StraightLine,
            dec!(1_000),
            dec!(0),
            12,
            dec!(0.40),
        );
        assert_eq!(monthly, dec!(83.33));
    }

    #[test]
    fn test_declining_balance_monthly() {
        // 1,200,000 × 0.40 / 12 = 40,000
        let monthly = monthly_depreciation(
            DepreciationMethod::DecliningBalance,
            dec!(1_200_000),
            dec!(120_000),
            36,
            dec!(0.40),
        );
        assert_eq!(monthly, dec!(40_000));
    }

    #[test]
    fn test_declining_balance_rate_is_parameterized() {
        let monthly = monthly_depreciation(
            DepreciationMethod::DecliningBalance,
            dec!(1_200_000),
            dec!(0),
            36,
            dec!(0.25),
        );
        assert_eq!(monthly, dec!(25_000));
    }

    #[test]
    fn test_compute_charge_for_active_asset() {
        let asset = asset(dec!(360_000), dec!(0), 36, DepreciationMethod::StraightLine);
        let charge = compute_charge(&asset, dec!(0.40), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap())
            .unwrap();
        assert_eq!(charge.amount, dec!(10_000));
        assert_eq!(charge.book_value_before, dec!(360_000));
        assert_eq!(charge.book_value_after, dec!(350_000));
        assert!(!charge.fully_depreciates);
    }

    #[test]
    fn test_compute_charge_clamps_final_month() {
        let mut asset = asset(dec!(360_000), dec!(0), 36, DepreciationMethod::StraightLine);
        // Leave only 5,000 of headroom; the nominal 10,000 charge clamps.
        asset.apply_depreciation(dec!(355_000), Utc::now()).unwrap();

        let charge = compute_charge(&asset, dec!(0.40), NaiveDate::from_ymd_opt(2028, 1, 31).unwrap())
            .unwrap();
        assert_eq!(charge.amount, dec!(5_000));
        assert_eq!(charge.book_value_after, Decimal::ZERO);
        assert!(charge.fully_depreciates);
    }

    #[test]
    fn test_compute_charge_skips_before_start() {
        let asset = asset(dec!(360_000), dec!(0), 36, DepreciationMethod::StraightLine);
        assert!(compute_charge(
            &asset,
            dec!(0.40),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        )
        .is_none());
    }

    #[test]
    fn test_compute_charge_skips_fully_depreciated() {
        let mut asset = asset(dec!(1_000), dec!(100), 10, DepreciationMethod::StraightLine);
        asset.apply_depreciation(dec!(900), Utc::now()).unwrap();
        assert_eq!(asset.status, AssetStatus::FullyDepreciated);
        assert!(compute_charge(
            &asset,
            dec!(0.40),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        )
        .is_none());
    }

    #[test]
    fn test_run_totals_and_lifecycle() {
        let period = PeriodRef::new(2026, 1).unwrap();
        let a = asset(dec!(360_000), dec!(0), 36, DepreciationMethod::StraightLine);
        let b = asset(dec!(120_000), dec!(0), 12, DepreciationMethod::StraightLine);
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();

        let charges = vec![
            compute_charge(&a, dec!(0.40), as_of).unwrap(),
            compute_charge(&b, dec!(0.40), as_of).unwrap(),
        ];

        let mut run = DepreciationRun::new(period, charges, UserId::new(), Utc::now());
        assert_eq!(run.status, RunStatus::Calculated);
        assert_eq!(run.total_amount, dec!(20_000));
        assert_eq!(run.lines.len(), 2);

        let entry_id = JournalEntryId::new();
        run.mark_posted(entry_id, UserId::new(), Utc::now()).unwrap();
        assert_eq!(run.status, RunStatus::Posted);
        assert_eq!(run.journal_entry_id, Some(entry_id));

        assert!(matches!(
            run.mark_posted(JournalEntryId::new(), UserId::new(), Utc::now()),
            Err(AssetError::RunAlreadyPosted(_))
        ));

        run.mark_reversed(UserId::new(), Utc::now()).unwrap();
        assert_eq!(run.status, RunStatus::Reversed);
        assert!(matches!(
            run.mark_posted(JournalEntryId::new(), UserId::new(), Utc::now()),
            Err(AssetError::InvalidRunTransition { .. })
        ));
    }

    #[test]
    fn test_reverse_requires_posted() {
        let mut run = DepreciationRun::new(
            PeriodRef::new(2026, 1).unwrap(),
            vec![],
            UserId::new(),
            Utc::now(),
        );
        assert!(matches!(
            run.mark_reversed(UserId::new(), Utc::now()),
            Err(AssetError::InvalidRunTransition { .. })
        ));
    }

    fn money_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..100_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// *For any* asset and charge sequence, the book value never drops
        /// below the salvage value.
        #[test]
        fn prop_book_value_never_below_salvage(
            cost in money_strategy(),
            salvage_fraction in 0u32..100,
            charges in prop::collection::vec(money_strategy(), 1..10),
        ) {
            let salvage = (cost * Decimal::from(salvage_fraction) / Decimal::from(100))
                .round_dp(2);
            let mut asset = asset(cost, salvage, 60, DepreciationMethod::StraightLine);

            for charge in charges {
                if asset.status != AssetStatus::Active {
                    break;
                }
                asset.apply_depreciation(charge, Utc::now()).unwrap();
                prop_assert!(asset.book_value >= asset.salvage_value);
                prop_assert_eq!(
                    asset.acquisition_cost - asset.accumulated_depreciation,
                    asset.book_value
                );
            }
        }

        /// *For any* depreciable asset, the computed charge never exceeds
        /// the remaining headroom above salvage.
        #[test]
        fn prop_charge_respects_headroom(
            cost in money_strategy(),
            life in 1u32..120,
        ) {
            let asset = asset(cost, Decimal::ZERO, life, DepreciationMethod::StraightLine);
            if let Some(charge) = compute_charge(
                &asset,
                dec!(0.40),
                NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            ) {
                prop_assert!(charge.amount <= asset.book_value - asset.salvage_value);
                prop_assert!(charge.amount > Decimal::ZERO);
            }
        }
    }
}
