//! Per-account period balance derivation.

use chrono::{DateTime, Utc};
use meridian_shared::types::{AccountId, PeriodRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::registry::NormalBalance;

/// Computes a closing balance from opening balance and period totals.
///
/// - Debit-normal: closing = opening + debit - credit
/// - Credit-normal: closing = opening + credit - debit
#[must_use]
pub fn closing_balance(
    normal_balance: NormalBalance,
    opening: Decimal,
    debit_total: Decimal,
    credit_total: Decimal,
) -> Decimal {
    match normal_balance {
        NormalBalance::Debit => opening + debit_total - credit_total,
        NormalBalance::Credit => opening + credit_total - debit_total,
    }
}

/// Aggregated posted activity for one account over one period.
///
/// Rows in this shape are produced by the persistence boundary's
/// aggregation query over posted journal lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccountActivity {
    /// The account.
    pub account_id: AccountId,
    /// Sum of posted debit line amounts.
    pub debit_total: Decimal,
    /// Sum of posted credit line amounts.
    pub credit_total: Decimal,
}

/// Account balance snapshot for one (account, period) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account.
    pub account_id: AccountId,
    /// The fiscal period.
    pub period: PeriodRef,
    /// Opening balance (closing balance of the previous period, 0 if none).
    pub opening_balance: Decimal,
    /// Total posted debits in the period.
    pub debit_total: Decimal,
    /// Total posted credits in the period.
    pub credit_total: Decimal,
    /// Closing balance per the normal-balance formula.
    pub closing_balance: Decimal,
    /// When this snapshot was last computed.
    pub updated_at: DateTime<Utc>,
}

impl AccountBalance {
    /// Builds a snapshot from opening balance and activity totals.
    #[must_use]
    pub fn build(
        account_id: AccountId,
        period: PeriodRef,
        normal_balance: NormalBalance,
        opening_balance: Decimal,
        activity: AccountActivity,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id,
            period,
            opening_balance,
            debit_total: activity.debit_total,
            credit_total: activity.credit_total,
            closing_balance: closing_balance(
                normal_balance,
                opening_balance,
                activity.debit_total,
                activity.credit_total,
            ),
            updated_at: now,
        }
    }
}
