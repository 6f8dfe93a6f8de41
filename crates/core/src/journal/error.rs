//! Error types for journal operations.

use chrono::NaiveDate;
use meridian_shared::types::{AccountId, JournalEntryId, PeriodRef};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    // ========== Account Errors ==========
    /// Referenced account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Referenced account is inactive.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Header accounts do not accept postings.
    #[error("Account {0} is a header account and does not accept postings")]
    PostingToHeader(AccountId),

    // ========== Period Errors ==========
    /// The entry date falls in a period that no longer accepts postings.
    #[error("Fiscal period {0} does not accept postings")]
    PeriodNotOpen(PeriodRef),

    /// The entry date is invalid for deriving a period.
    #[error("No fiscal period can be derived for date {0}")]
    InvalidEntryDate(NaiveDate),

    // ========== State Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(JournalEntryId),

    /// Only draft entries can be edited.
    #[error("Cannot modify entry {0}: only draft entries can be edited")]
    NotEditable(JournalEntryId),

    /// Only draft entries can be deleted.
    #[error("Cannot delete entry {0}: only draft entries can be deleted")]
    NotDeletable(JournalEntryId),

    /// Only draft entries can be posted.
    #[error("Cannot post entry {0}: it is not a draft")]
    NotPostable(JournalEntryId),

    /// Only posted entries can be voided.
    #[error("Cannot void entry {0}: only posted entries can be voided")]
    NotVoidable(JournalEntryId),

    /// Voiding requires a reason.
    #[error("Voiding a journal entry requires a reason")]
    VoidReasonRequired,

    // ========== Storage ==========
    /// Storage error from the persistence boundary.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::PostingToHeader(_) => "POSTING_TO_HEADER",
            Self::PeriodNotOpen(_) => "PERIOD_NOT_OPEN",
            Self::InvalidEntryDate(_) => "INVALID_ENTRY_DATE",
            Self::NotFound(_) => "ENTRY_NOT_FOUND",
            Self::NotEditable(_) => "ENTRY_NOT_EDITABLE",
            Self::NotDeletable(_) => "ENTRY_NOT_DELETABLE",
            Self::NotPostable(_) => "ENTRY_NOT_POSTABLE",
            Self::NotVoidable(_) => "ENTRY_NOT_VOIDABLE",
            Self::VoidReasonRequired => "VOID_REASON_REQUIRED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientLines
            | Self::UnbalancedEntry { .. }
            | Self::ZeroAmount
            | Self::NegativeAmount
            | Self::AccountInactive(_)
            | Self::PostingToHeader(_)
            | Self::PeriodNotOpen(_)
            | Self::InvalidEntryDate(_)
            | Self::NotEditable(_)
            | Self::NotDeletable(_)
            | Self::NotPostable(_)
            | Self::NotVoidable(_)
            | Self::VoidReasonRequired => 400,
            Self::AccountNotFound(_) | Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }
}
