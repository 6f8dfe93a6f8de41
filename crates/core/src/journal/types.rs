//! Journal domain types for entry creation and validation.

use chrono::NaiveDate;
use meridian_shared::types::{AccountId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::Direction;

/// Input for a single journal line.
#[derive(Debug, Clone)]
pub struct JournalLineInput {
    /// The detail account to post to.
    pub account_id: AccountId,
    /// Whether this is a debit or credit line.
    pub direction: Direction,
    /// The line amount (must be strictly positive).
    pub amount: Decimal,
    /// Optional memo for this line.
    pub memo: Option<String>,
}

/// Input for creating a new journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalEntryInput {
    /// The entry date; the fiscal period is derived from it.
    pub entry_date: NaiveDate,
    /// A description of the business event.
    pub description: String,
    /// Optional reference (e.g. invoice number).
    pub reference: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Originating subsystem for generated entries (e.g. "depreciation").
    pub source_service: Option<String>,
    /// Stable reference within the originating subsystem.
    pub source_reference: Option<String>,
    /// The journal lines (must have at least 2).
    pub lines: Vec<JournalLineInput>,
    /// The user creating the entry.
    pub created_by: UserId,
}

/// Input for updating a draft journal entry.
///
/// `None` fields are left unchanged; `lines` replaces the full line set.
#[derive(Debug, Clone, Default)]
pub struct UpdateJournalEntryInput {
    /// New entry date.
    pub entry_date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
    /// New reference.
    pub reference: Option<Option<String>>,
    /// New notes.
    pub notes: Option<Option<String>>,
    /// Replacement line set.
    pub lines: Option<Vec<JournalLineInput>>,
}

/// Debit/credit totals of an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}
