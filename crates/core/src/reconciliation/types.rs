//! Reconciliation aggregates.

use chrono::{DateTime, NaiveDate, Utc};
use meridian_shared::types::{
    AccountId, BankAccountId, BankTransactionId, JournalLineId, PeriodRef, ReconciliationId,
    ReconcilingItemId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReconciliationError;

/// A bank account tracked for reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Unique identifier.
    pub id: BankAccountId,
    /// Display name (e.g. "Operating - First National").
    pub name: String,
    /// Bank account number, as printed on statements.
    pub account_number: String,
    /// The GL cash account this bank account books to.
    pub gl_account_id: AccountId,
    /// Statement balance recorded at the last approved reconciliation.
    pub last_reconciled_balance: Option<Decimal>,
    /// Date of the last approved reconciliation.
    pub last_reconciled_date: Option<NaiveDate>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    /// Records an approved reconciliation's statement balance and date.
    pub fn record_reconciliation(
        &mut self,
        balance: Decimal,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) {
        self.last_reconciled_balance = Some(balance);
        self.last_reconciled_date = Some(date);
        self.updated_at = now;
    }
}

/// Match state of a bank statement transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchState {
    /// Not yet matched to a journal line.
    Unmatched,
    /// Matched to a journal line.
    Matched,
}

/// A transaction from a bank statement.
///
/// Amounts use the statement's sign convention: deposits positive,
/// withdrawals negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankTransaction {
    /// Unique identifier.
    pub id: BankTransactionId,
    /// The bank account this transaction belongs to.
    pub bank_account_id: BankAccountId,
    /// Statement transaction date.
    pub transaction_date: NaiveDate,
    /// Statement description.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Current match state.
    pub match_state: MatchState,
    /// The journal line this transaction matched to.
    pub matched_line_id: Option<JournalLineId>,
    /// Who confirmed the match.
    pub matched_by: Option<UserId>,
    /// When the match was confirmed.
    pub matched_at: Option<DateTime<Utc>>,
}

impl BankTransaction {
    /// Marks the transaction as matched to a journal line.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyMatched` when the transaction is not unmatched.
    pub fn mark_matched(
        &mut self,
        line_id: JournalLineId,
        by: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), ReconciliationError> {
        if self.match_state != MatchState::Unmatched {
            return Err(ReconciliationError::AlreadyMatched(self.id));
        }

        self.match_state = MatchState::Matched;
        self.matched_line_id = Some(line_id);
        self.matched_by = Some(by);
        self.matched_at = Some(now);
        Ok(())
    }
}

/// Which side of the reconciliation an item adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentSide {
    /// Adjusts the bank statement balance (not yet reflected at the bank).
    Bank,
    /// Adjusts the book balance (not yet reflected in the books).
    Book,
}

/// Kind of reconciling item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilingItemKind {
    /// Check issued but not yet cleared by the bank (bank side, subtract).
    OutstandingCheck,
    /// Deposit recorded in the books but not yet at the bank (bank side, add).
    DepositInTransit,
    /// Fee charged by the bank, not yet booked (book side, subtract).
    BankFee,
    /// Interest paid by the bank, not yet booked (book side, add).
    InterestEarned,
}

impl ReconcilingItemKind {
    /// Returns which balance this item adjusts.
    #[must_use]
    pub const fn side(self) -> AdjustmentSide {
        match self {
            Self::OutstandingCheck | Self::DepositInTransit => AdjustmentSide::Bank,
            Self::BankFee | Self::InterestEarned => AdjustmentSide::Book,
        }
    }

    /// Returns the signed adjustment for a positive item amount.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::DepositInTransit | Self::InterestEarned => amount,
            Self::OutstandingCheck | Self::BankFee => -amount,
        }
    }

    /// Returns true when items of this kind still need a journal entry to
    /// land in the books.
    #[must_use]
    pub const fn requires_journal_entry(self) -> bool {
        matches!(self.side(), AdjustmentSide::Book)
    }
}

/// A difference between bank and book records not yet reflected in both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilingItem {
    /// Unique identifier.
    pub id: ReconcilingItemId,
    /// Item kind.
    pub kind: ReconcilingItemKind,
    /// Description.
    pub description: String,
    /// Positive amount; the kind determines the sign of the adjustment.
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Whether a journal entry is still needed for this item.
    pub requires_journal_entry: bool,
}

impl ReconcilingItem {
    /// Creates a new reconciling item, deriving the journal-entry flag
    /// from the kind.
    #[must_use]
    pub fn new(
        kind: ReconcilingItemKind,
        description: impl Into<String>,
        amount: Decimal,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: ReconcilingItemId::new(),
            kind,
            description: description.into(),
            amount,
            transaction_date,
            requires_journal_entry: kind.requires_journal_entry(),
        }
    }
}

/// Reconciliation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    /// Created but not yet started.
    Draft,
    /// Matching and item entry in progress.
    InProgress,
    /// Balanced and completed, awaiting approval.
    Completed,
    /// Approved; the bank account's last-reconciled marker is updated.
    Approved,
}

/// Adjusted bank/book balances derived from reconciling items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdjustedBalances {
    /// Statement balance adjusted by bank-side items.
    pub bank: Decimal,
    /// Book balance adjusted by book-side items.
    pub book: Decimal,
    /// bank - book.
    pub difference: Decimal,
    /// Whether the two adjusted balances agree exactly.
    pub is_balanced: bool,
}

/// A bank reconciliation for one (bank account, period) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankReconciliation {
    /// Unique identifier.
    pub id: ReconciliationId,
    /// The bank account being reconciled.
    pub bank_account_id: BankAccountId,
    /// The fiscal period being reconciled.
    pub period: PeriodRef,
    /// Ending balance per the bank statement.
    pub statement_balance: Decimal,
    /// Ending balance per the books.
    pub book_balance: Decimal,
    /// Current status.
    pub status: ReconciliationStatus,
    /// Adjusted bank balance (None until calculated).
    pub adjusted_bank_balance: Option<Decimal>,
    /// Adjusted book balance (None until calculated).
    pub adjusted_book_balance: Option<Decimal>,
    /// Ordered reconciling items.
    pub items: Vec<ReconcilingItem>,
    /// Who approved the reconciliation.
    pub approved_by: Option<UserId>,
    /// When the reconciliation was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Who created the reconciliation.
    pub created_by: UserId,
    /// When the reconciliation was created.
    pub created_at: DateTime<Utc>,
    /// When the reconciliation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl BankReconciliation {
    /// Creates a new draft reconciliation.
    #[must_use]
    pub fn new(
        bank_account_id: BankAccountId,
        period: PeriodRef,
        statement_balance: Decimal,
        book_balance: Decimal,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReconciliationId::new(),
            bank_account_id,
            period,
            statement_balance,
            book_balance,
            status: ReconciliationStatus::Draft,
            adjusted_bank_balance: None,
            adjusted_book_balance: None,
            items: Vec::new(),
            approved_by: None,
            approved_at: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Starts the reconciliation (Draft → InProgress).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the status is Draft.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), ReconciliationError> {
        if self.status != ReconciliationStatus::Draft {
            return Err(ReconciliationError::InvalidStatusTransition {
                from: self.status,
                to: ReconciliationStatus::InProgress,
            });
        }
        self.status = ReconciliationStatus::InProgress;
        self.updated_at = now;
        Ok(())
    }

    /// Adds a reconciling item while in progress.
    ///
    /// Adding an item invalidates previously calculated balances.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` unless the status is InProgress.
    pub fn add_item(
        &mut self,
        item: ReconcilingItem,
        now: DateTime<Utc>,
    ) -> Result<(), ReconciliationError> {
        if self.status != ReconciliationStatus::InProgress {
            return Err(ReconciliationError::NotInProgress(self.status));
        }
        self.items.push(item);
        self.adjusted_bank_balance = None;
        self.adjusted_book_balance = None;
        self.updated_at = now;
        Ok(())
    }

    /// Derives the adjusted balances from the current item set and stores
    /// them on the reconciliation.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` unless the status is InProgress.
    pub fn calculate_adjusted_balances(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<AdjustedBalances, ReconciliationError> {
        if self.status != ReconciliationStatus::InProgress {
            return Err(ReconciliationError::NotInProgress(self.status));
        }

        let balances = self.derive_adjusted_balances();
        self.adjusted_bank_balance = Some(balances.bank);
        self.adjusted_book_balance = Some(balances.book);
        self.updated_at = now;
        Ok(balances)
    }

    /// Computes adjusted balances without mutating state.
    #[must_use]
    pub fn derive_adjusted_balances(&self) -> AdjustedBalances {
        let mut bank = self.statement_balance;
        let mut book = self.book_balance;

        for item in &self.items {
            let signed = item.kind.signed(item.amount);
            match item.kind.side() {
                AdjustmentSide::Bank => bank += signed,
                AdjustmentSide::Book => book += signed,
            }
        }

        AdjustedBalances {
            bank,
            book,
            difference: bank - book,
            is_balanced: bank == book,
        }
    }

    /// Completes the reconciliation, calculating balances if needed.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` unless the status is InProgress.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), ReconciliationError> {
        if self.status != ReconciliationStatus::InProgress {
            return Err(ReconciliationError::NotInProgress(self.status));
        }

        if self.adjusted_bank_balance.is_none() || self.adjusted_book_balance.is_none() {
            let balances = self.derive_adjusted_balances();
            self.adjusted_bank_balance = Some(balances.bank);
            self.adjusted_book_balance = Some(balances.book);
        }

        self.status = ReconciliationStatus::Completed;
        self.updated_at = now;
        Ok(())
    }

    /// Approves a completed reconciliation.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the status is Completed.
    pub fn approve(&mut self, by: UserId, now: DateTime<Utc>) -> Result<(), ReconciliationError> {
        if self.status != ReconciliationStatus::Completed {
            return Err(ReconciliationError::InvalidStatusTransition {
                from: self.status,
                to: ReconciliationStatus::Approved,
            });
        }

        self.status = ReconciliationStatus::Approved;
        self.approved_by = Some(by);
        self.approved_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}
