//! Trial balance aggregation.

use meridian_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::registry::NormalBalance;

/// One account's closing balance with its normal side, the input to trial
/// balance aggregation.
#[derive(Debug, Clone)]
pub struct ClosingRow {
    /// The account.
    pub account_id: AccountId,
    /// Account code for presentation ordering.
    pub code: String,
    /// The account's normal balance side.
    pub normal_balance: NormalBalance,
    /// The closing balance (may be negative when the account runs against
    /// its normal side).
    pub closing_balance: Decimal,
}

/// One row of the trial balance, split into debit/credit columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Debit-column amount.
    pub debit: Decimal,
    /// Credit-column amount.
    pub credit: Decimal,
}

/// A period-end trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Rows ordered by account code.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Absolute difference between the columns.
    pub difference: Decimal,
    /// Whether the difference is inside the configured tolerance.
    pub is_balanced: bool,
}

impl TrialBalance {
    /// Builds a trial balance from per-account closing rows.
    ///
    /// A positive closing balance lands on the account's normal side; a
    /// negative closing balance flips to the opposite column with its sign
    /// removed. A difference strictly below `tolerance` counts as balanced.
    #[must_use]
    pub fn build(mut rows: Vec<ClosingRow>, tolerance: Decimal) -> Self {
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        let rows: Vec<TrialBalanceRow> = rows
            .into_iter()
            .map(|row| {
                let magnitude = row.closing_balance.abs();
                let on_normal_side = !row.closing_balance.is_sign_negative();

                let (debit, credit) = match (row.normal_balance, on_normal_side) {
                    (NormalBalance::Debit, true) | (NormalBalance::Credit, false) => {
                        (magnitude, Decimal::ZERO)
                    }
                    (NormalBalance::Credit, true) | (NormalBalance::Debit, false) => {
                        (Decimal::ZERO, magnitude)
                    }
                };

                total_debit += debit;
                total_credit += credit;

                TrialBalanceRow {
                    account_id: row.account_id,
                    code: row.code,
                    debit,
                    credit,
                }
            })
            .collect();

        let difference = (total_debit - total_credit).abs();

        Self {
            rows,
            total_debit,
            total_credit,
            is_balanced: difference < tolerance,
            difference,
        }
    }
}
