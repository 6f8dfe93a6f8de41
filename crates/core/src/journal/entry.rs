//! Journal entry aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use meridian_shared::types::{JournalEntryId, JournalLineId, PeriodRef, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::JournalError;
use super::types::{CreateJournalEntryInput, EntryTotals, JournalLineInput};

/// Line direction: either Debit or Credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Debit line.
    Debit,
    /// Credit line.
    Credit,
}

/// Journal entry status.
///
/// Entries progress Draft → Posted → Voided; posting makes an entry affect
/// balances, voiding flips the status without deleting history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified or deleted.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been voided (immutable).
    Voided,
}

impl EntryStatus {
    /// Returns true if the entry can be modified or deleted.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry contributes to account balances.
    #[must_use]
    pub fn affects_balances(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

/// A single debit or credit line within a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: JournalLineId,
    /// The detail account this line posts to.
    pub account_id: meridian_shared::types::AccountId,
    /// Debit or credit.
    pub direction: Direction,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}

impl JournalLine {
    /// Returns the debit portion of this line (0 for credit lines).
    #[must_use]
    pub fn debit(&self) -> Decimal {
        match self.direction {
            Direction::Debit => self.amount,
            Direction::Credit => Decimal::ZERO,
        }
    }

    /// Returns the credit portion of this line (0 for debit lines).
    #[must_use]
    pub fn credit(&self) -> Decimal {
        match self.direction {
            Direction::Debit => Decimal::ZERO,
            Direction::Credit => self.amount,
        }
    }
}

/// A balanced journal entry recording one business event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Sequential number, scoped to the fiscal period.
    pub entry_number: i64,
    /// The fiscal period derived from the entry date.
    pub period: PeriodRef,
    /// The entry date.
    pub entry_date: NaiveDate,
    /// Description of the business event.
    pub description: String,
    /// Optional reference (e.g. invoice number).
    pub reference: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Originating subsystem for generated entries.
    pub source_service: Option<String>,
    /// Stable reference within the originating subsystem.
    pub source_reference: Option<String>,
    /// Current status.
    pub status: EntryStatus,
    /// Ordered journal lines.
    pub lines: Vec<JournalLine>,
    /// User who created the entry.
    pub created_by: UserId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
    /// User who posted the entry.
    pub posted_by: Option<UserId>,
    /// When the entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// User who voided the entry.
    pub voided_by: Option<UserId>,
    /// When the entry was voided.
    pub voided_at: Option<DateTime<Utc>>,
    /// Why the entry was voided.
    pub void_reason: Option<String>,
}

impl JournalEntry {
    /// Assembles a draft entry from validated input.
    ///
    /// Callers are expected to have run [`super::validation::validate_lines`]
    /// first; this constructor does not re-check accounts.
    #[must_use]
    pub fn from_input(
        input: CreateJournalEntryInput,
        entry_number: i64,
        period: PeriodRef,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: JournalEntryId::new(),
            entry_number,
            period,
            entry_date: input.entry_date,
            description: input.description,
            reference: input.reference,
            notes: input.notes,
            source_service: input.source_service,
            source_reference: input.source_reference,
            status: EntryStatus::Draft,
            lines: Self::build_lines(input.lines),
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
            posted_by: None,
            posted_at: None,
            voided_by: None,
            voided_at: None,
            void_reason: None,
        }
    }

    /// Materializes line inputs into lines with fresh IDs.
    #[must_use]
    pub fn build_lines(inputs: Vec<JournalLineInput>) -> Vec<JournalLine> {
        inputs
            .into_iter()
            .map(|input| JournalLine {
                id: JournalLineId::new(),
                account_id: input.account_id,
                direction: input.direction,
                amount: input.amount,
                memo: input.memo,
            })
            .collect()
    }

    /// Calculates the entry's debit/credit totals.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        let debit: Decimal = self.lines.iter().map(JournalLine::debit).sum();
        let credit: Decimal = self.lines.iter().map(JournalLine::credit).sum();
        EntryTotals::new(debit, credit)
    }

    /// Posts the entry, stamping poster and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `NotPostable` when the entry is not a draft, and
    /// `UnbalancedEntry` when debits do not equal credits.
    pub fn post(&mut self, by: UserId, now: DateTime<Utc>) -> Result<(), JournalError> {
        if self.status != EntryStatus::Draft {
            return Err(JournalError::NotPostable(self.id));
        }

        let totals = self.totals();
        if !totals.is_balanced {
            return Err(JournalError::UnbalancedEntry {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        self.status = EntryStatus::Posted;
        self.posted_by = Some(by);
        self.posted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Voids a posted entry, recording actor and reason.
    ///
    /// Voiding never deletes: the entry stays in history with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotVoidable` unless the entry is posted, and
    /// `VoidReasonRequired` when the reason is blank.
    pub fn void(
        &mut self,
        by: UserId,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), JournalError> {
        if self.status != EntryStatus::Posted {
            return Err(JournalError::NotVoidable(self.id));
        }

        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(JournalError::VoidReasonRequired);
        }

        self.status = EntryStatus::Voided;
        self.voided_by = Some(by);
        self.voided_at = Some(now);
        self.void_reason = Some(reason);
        self.updated_at = now;
        Ok(())
    }
}
