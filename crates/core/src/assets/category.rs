//! Asset categories.

use chrono::{DateTime, Utc};
use meridian_shared::types::{AccountId, AssetCategoryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed asset category.
///
/// Categories supply the GL account wiring used when depreciation and
/// disposals are posted, plus the category's depreciation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCategory {
    /// Unique identifier.
    pub id: AssetCategoryId,
    /// Display name (e.g. "Vehicles").
    pub name: String,
    /// Fixed asset account (1400-1499 band), credited on disposal.
    pub asset_account_id: AccountId,
    /// Accumulated depreciation contra account.
    pub accumulated_depreciation_account_id: AccountId,
    /// Depreciation expense account.
    pub depreciation_expense_account_id: AccountId,
    /// Gain/loss on disposal account.
    pub disposal_gain_loss_account_id: AccountId,
    /// Annual declining-balance rate; None falls back to the configured
    /// default.
    pub declining_rate: Option<Decimal>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AssetCategory {
    /// Returns this category's declining-balance rate, falling back to the
    /// supplied default.
    #[must_use]
    pub fn declining_rate_or(&self, default: Decimal) -> Decimal {
        self.declining_rate.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn category(rate: Option<Decimal>) -> AssetCategory {
        AssetCategory {
            id: AssetCategoryId::new(),
            name: "Vehicles".to_string(),
            asset_account_id: AccountId::new(),
            accumulated_depreciation_account_id: AccountId::new(),
            depreciation_expense_account_id: AccountId::new(),
            disposal_gain_loss_account_id: AccountId::new(),
            declining_rate: rate,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_declining_rate_override() {
        assert_eq!(
            category(Some(dec!(0.25))).declining_rate_or(dec!(0.40)),
            dec!(0.25)
        );
        assert_eq!(category(None).declining_rate_or(dec!(0.40)), dec!(0.40));
    }
}
