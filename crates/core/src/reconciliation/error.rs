//! Error types for reconciliation operations.

use meridian_shared::types::{
    BankAccountId, BankTransactionId, JournalLineId, PeriodRef, ReconciliationId,
};
use thiserror::Error;

use super::types::ReconciliationStatus;

/// Errors that can occur during bank reconciliation.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// A reconciliation already exists for this bank account and period.
    #[error("Reconciliation already exists for bank account {bank_account_id} in {period}")]
    AlreadyExists {
        /// The bank account.
        bank_account_id: BankAccountId,
        /// The period.
        period: PeriodRef,
    },

    /// Reconciliation not found.
    #[error("Reconciliation not found: {0}")]
    NotFound(ReconciliationId),

    /// Bank account not found.
    #[error("Bank account not found: {0}")]
    BankAccountNotFound(BankAccountId),

    /// Bank transaction not found.
    #[error("Bank transaction not found: {0}")]
    TransactionNotFound(BankTransactionId),

    /// Bank transaction is already matched.
    #[error("Bank transaction {0} is already matched")]
    AlreadyMatched(BankTransactionId),

    /// Journal line not found for matching.
    #[error("Journal line not found: {0}")]
    JournalLineNotFound(JournalLineId),

    /// Operation requires the reconciliation to be in progress.
    #[error("Reconciliation is {0:?}; operation requires InProgress")]
    NotInProgress(ReconciliationStatus),

    /// Invalid status transition.
    #[error("Invalid reconciliation transition from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Current status.
        from: ReconciliationStatus,
        /// Target status.
        to: ReconciliationStatus,
    },

    /// Storage error from the persistence boundary.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ReconciliationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "RECONCILIATION_EXISTS",
            Self::NotFound(_) => "RECONCILIATION_NOT_FOUND",
            Self::BankAccountNotFound(_) => "BANK_ACCOUNT_NOT_FOUND",
            Self::TransactionNotFound(_) => "BANK_TRANSACTION_NOT_FOUND",
            Self::AlreadyMatched(_) => "TRANSACTION_ALREADY_MATCHED",
            Self::JournalLineNotFound(_) => "JOURNAL_LINE_NOT_FOUND",
            Self::NotInProgress(_) => "RECONCILIATION_NOT_IN_PROGRESS",
            Self::InvalidStatusTransition { .. } => "INVALID_RECONCILIATION_TRANSITION",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AlreadyMatched(_)
            | Self::NotInProgress(_)
            | Self::InvalidStatusTransition { .. } => 400,
            Self::NotFound(_)
            | Self::BankAccountNotFound(_)
            | Self::TransactionNotFound(_)
            | Self::JournalLineNotFound(_) => 404,
            Self::AlreadyExists { .. } => 409,
            Self::Storage(_) => 500,
        }
    }
}
