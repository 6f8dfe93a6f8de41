//! Account code classification.
//!
//! Account codes are fixed-width 4-digit numeric strings. The leading band
//! determines the account type and normal balance; sub-ranges within a band
//! determine the category.

use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Account type derived from the code band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// 1000-1999. Resources owned by the business.
    Asset,
    /// 2000-2999. Obligations owed to others.
    Liability,
    /// 3000-3999. Owner's residual interest.
    Equity,
    /// 4000-4999. Income from operations.
    Revenue,
    /// 5000-5999. Direct cost of goods sold.
    CostOfGoodsSold,
    /// 6000-9999. Operating and other expenses.
    Expense,
}

impl AccountType {
    /// Returns the side on which accounts of this type naturally increase.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::CostOfGoodsSold | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

/// The side (debit or credit) on which an account naturally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal: assets, COGS, expenses.
    Debit,
    /// Credit-normal: liabilities, equity, revenue.
    Credit,
}

/// Account category derived from the code sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// 1000-1399.
    CurrentAsset,
    /// 1400-1499.
    FixedAsset,
    /// 1500-1999.
    OtherAsset,
    /// 2000-2499.
    CurrentLiability,
    /// 2500-2999.
    LongTermLiability,
    /// 3000-3999.
    Equity,
    /// 4000-4899.
    OperatingRevenue,
    /// 4900-4999.
    OtherRevenue,
    /// 5000-5999.
    CostOfGoodsSold,
    /// 6000-8999.
    OperatingExpense,
    /// 9000-9999.
    OtherExpense,
}

/// Full classification of an account code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The account type band.
    pub account_type: AccountType,
    /// The category sub-range.
    pub category: AccountCategory,
    /// The normal balance side.
    pub normal_balance: NormalBalance,
}

/// Classifies a 4-digit account code.
///
/// # Errors
///
/// Returns `RegistryError::InvalidCode` when the code is not exactly four
/// ASCII digits.
pub fn classify(code: &str) -> Result<Classification, RegistryError> {
    if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RegistryError::InvalidCode(code.to_string()));
    }

    let numeric: u16 = code
        .parse()
        .map_err(|_| RegistryError::InvalidCode(code.to_string()))?;

    let (account_type, category) = match numeric {
        1000..=1399 => (AccountType::Asset, AccountCategory::CurrentAsset),
        1400..=1499 => (AccountType::Asset, AccountCategory::FixedAsset),
        1500..=1999 => (AccountType::Asset, AccountCategory::OtherAsset),
        2000..=2499 => (AccountType::Liability, AccountCategory::CurrentLiability),
        2500..=2999 => (AccountType::Liability, AccountCategory::LongTermLiability),
        3000..=3999 => (AccountType::Equity, AccountCategory::Equity),
        4000..=4899 => (AccountType::Revenue, AccountCategory::OperatingRevenue),
        4900..=4999 => (AccountType::Revenue, AccountCategory::OtherRevenue),
        5000..=5999 => (AccountType::CostOfGoodsSold, AccountCategory::CostOfGoodsSold),
        6000..=8999 => (AccountType::Expense, AccountCategory::OperatingExpense),
        9000..=9999 => (AccountType::Expense, AccountCategory::OtherExpense),
        // Codes below 1000 keep their leading zeros, e.g. "0100".
        _ => return Err(RegistryError::InvalidCode(code.to_string())),
    };

    Ok(Classification {
        account_type,
        category,
        normal_balance: account_type.normal_balance(),
    })
}
