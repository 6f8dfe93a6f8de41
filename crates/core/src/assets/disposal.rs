//! Asset disposal and write-off.
//!
//! Disposal derives the gain or loss against the book value at disposal
//! and, when requested, the balanced journal lines that remove the asset
//! from the books. A write-off is a disposal at zero value.

use chrono::NaiveDate;
use meridian_shared::types::{AccountId, FixedAssetId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::FixedAsset;
use super::error::AssetError;
use crate::journal::{Direction, JournalLineInput};

/// The result of disposing an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisposalOutcome {
    /// The asset.
    pub asset_id: FixedAssetId,
    /// The disposal date.
    pub disposal_date: NaiveDate,
    /// Proceeds received (0 for a write-off).
    pub disposal_value: Decimal,
    /// Original acquisition cost.
    pub acquisition_cost: Decimal,
    /// Depreciation accumulated up to disposal.
    pub accumulated_depreciation: Decimal,
    /// Book value at disposal.
    pub book_value_at_disposal: Decimal,
    /// disposal value - book value. Positive is a gain, negative a loss.
    pub gain_loss: Decimal,
    /// Whether the difference is a gain.
    pub is_gain: bool,
}

/// GL accounts involved in a disposal entry.
#[derive(Debug, Clone)]
pub struct DisposalAccounts {
    /// Fixed asset account (credited for the acquisition cost).
    pub asset_account_id: AccountId,
    /// Accumulated depreciation account (debited in full).
    pub accumulated_depreciation_account_id: AccountId,
    /// Gain/loss on disposal account.
    pub gain_loss_account_id: AccountId,
    /// Account receiving the proceeds; required when disposal value > 0.
    pub proceeds_account_id: Option<AccountId>,
}

/// Computes the financial outcome of disposing an asset.
///
/// # Errors
///
/// Returns `NegativeDisposalValue` for negative proceeds and
/// `AlreadyDisposed` when the asset's status does not allow disposal.
pub fn compute_disposal(
    asset: &FixedAsset,
    disposal_value: Decimal,
    disposal_date: NaiveDate,
) -> Result<DisposalOutcome, AssetError> {
    if disposal_value < Decimal::ZERO {
        return Err(AssetError::NegativeDisposalValue(disposal_value));
    }
    if !asset.status.is_disposable() {
        return Err(AssetError::AlreadyDisposed(asset.id));
    }

    let gain_loss = disposal_value - asset.book_value;

    Ok(DisposalOutcome {
        asset_id: asset.id,
        disposal_date,
        disposal_value,
        acquisition_cost: asset.acquisition_cost,
        accumulated_depreciation: asset.accumulated_depreciation,
        book_value_at_disposal: asset.book_value,
        gain_loss,
        is_gain: gain_loss > Decimal::ZERO,
    })
}

/// Builds the balanced journal lines for a disposal:
/// - debit accumulated depreciation for the full accumulated amount
/// - credit the fixed asset account for the acquisition cost
/// - debit the proceeds account for the disposal value, if any
/// - credit a gain (or debit a loss) to the gain/loss account
///
/// # Errors
///
/// Returns `MissingProceedsAccount` when there are proceeds but no account
/// to receive them.
pub fn disposal_lines(
    outcome: &DisposalOutcome,
    accounts: &DisposalAccounts,
) -> Result<Vec<JournalLineInput>, AssetError> {
    let mut lines = Vec::with_capacity(4);

    if outcome.accumulated_depreciation > Decimal::ZERO {
        lines.push(JournalLineInput {
            account_id: accounts.accumulated_depreciation_account_id,
            direction: Direction::Debit,
            amount: outcome.accumulated_depreciation,
            memo: Some("Accumulated depreciation on disposal".to_string()),
        });
    }

    lines.push(JournalLineInput {
        account_id: accounts.asset_account_id,
        direction: Direction::Credit,
        amount: outcome.acquisition_cost,
        memo: Some("Asset cost removed on disposal".to_string()),
    });

    if outcome.disposal_value > Decimal::ZERO {
        let proceeds_account = accounts
            .proceeds_account_id
            .ok_or(AssetError::MissingProceedsAccount)?;
        lines.push(JournalLineInput {
            account_id: proceeds_account,
            direction: Direction::Debit,
            amount: outcome.disposal_value,
            memo: Some("Disposal proceeds".to_string()),
        });
    }

    if outcome.gain_loss > Decimal::ZERO {
        lines.push(JournalLineInput {
            account_id: accounts.gain_loss_account_id,
            direction: Direction::Credit,
            amount: outcome.gain_loss,
            memo: Some("Gain on disposal".to_string()),
        });
    } else if outcome.gain_loss < Decimal::ZERO {
        lines.push(JournalLineInput {
            account_id: accounts.gain_loss_account_id,
            direction: Direction::Debit,
            amount: -outcome.gain_loss,
            memo: Some("Loss on disposal".to_string()),
        });
    }

    Ok(lines)
}
