//! Journal entry validation.
//!
//! Pure validation with no persistence dependencies: account information is
//! injected through a lookup function so the same rules run against any
//! account source.

use meridian_shared::types::AccountId;
use rust_decimal::Decimal;

use super::entry::Direction;
use super::error::JournalError;
use super::types::{EntryTotals, JournalLineInput};

/// The slice of account state needed to validate a posting.
#[derive(Debug, Clone, Copy)]
pub struct PostingAccount {
    /// The account ID.
    pub id: AccountId,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account is a header (aggregation-only) account.
    pub is_header: bool,
}

/// Validates a prospective line set and returns its totals.
///
/// Checks, in order:
/// 1. At least 2 lines
/// 2. Every amount strictly positive
/// 3. Every account resolvable, active, and a detail account
/// 4. Sum of debits equals sum of credits
///
/// # Errors
///
/// Returns the first `JournalError` encountered.
pub fn validate_lines<A>(
    lines: &[JournalLineInput],
    account_lookup: A,
) -> Result<EntryTotals, JournalError>
where
    A: Fn(AccountId) -> Result<PostingAccount, JournalError>,
{
    if lines.len() < 2 {
        return Err(JournalError::InsufficientLines);
    }

    let mut debit = Decimal::ZERO;
    let mut credit = Decimal::ZERO;

    for line in lines {
        if line.amount == Decimal::ZERO {
            return Err(JournalError::ZeroAmount);
        }
        if line.amount < Decimal::ZERO {
            return Err(JournalError::NegativeAmount);
        }

        let account = account_lookup(line.account_id)?;
        if !account.is_active {
            return Err(JournalError::AccountInactive(line.account_id));
        }
        if account.is_header {
            return Err(JournalError::PostingToHeader(line.account_id));
        }

        match line.direction {
            Direction::Debit => debit += line.amount,
            Direction::Credit => credit += line.amount,
        }
    }

    let totals = EntryTotals::new(debit, credit);
    if !totals.is_balanced {
        return Err(JournalError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}
