//! Error types for fiscal period operations.

use meridian_shared::types::{InvalidMonth, PeriodRef};
use thiserror::Error;

use super::period::PeriodStatus;
use crate::balance::BalanceError;

/// Errors that can occur during fiscal period operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Month outside 1-12.
    #[error(transparent)]
    InvalidMonth(#[from] InvalidMonth),

    /// A period already exists for the (year, month) pair.
    #[error("Fiscal period {0} already exists")]
    DuplicatePeriod(PeriodRef),

    /// Fiscal period not found.
    #[error("Fiscal period {0} not found")]
    NotFound(PeriodRef),

    /// Invalid status transition.
    #[error("Invalid fiscal period transition from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Current status.
        from: PeriodStatus,
        /// Target status.
        to: PeriodStatus,
    },

    /// Cannot close a period while its predecessor is still open.
    #[error("Cannot close {period}: previous period {previous} is not closed")]
    PreviousPeriodOpen {
        /// The period being closed.
        period: PeriodRef,
        /// The open predecessor.
        previous: PeriodRef,
    },

    /// Cannot close a period that still holds draft entries.
    #[error("Cannot close {period}: {count} draft journal entries remain")]
    DraftEntriesRemain {
        /// The period being closed.
        period: PeriodRef,
        /// Number of draft entries in the period.
        count: u64,
    },

    /// Locked periods are terminal.
    #[error("Fiscal period {0} is locked")]
    PeriodLocked(PeriodRef),

    /// Reopen reason shorter than the required minimum.
    #[error("Reopen reason must be at least {min} characters, got {actual}")]
    ReopenReasonTooShort {
        /// Actual reason length.
        actual: usize,
        /// Required minimum length.
        min: usize,
    },

    /// Balance snapshot recalculation at close failed.
    #[error("Balance recalculation failed: {0}")]
    BalanceRecalculation(#[from] BalanceError),

    /// Storage error from the persistence boundary.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FiscalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::DuplicatePeriod(_) => "DUPLICATE_PERIOD",
            Self::NotFound(_) => "PERIOD_NOT_FOUND",
            Self::InvalidStatusTransition { .. } => "INVALID_PERIOD_TRANSITION",
            Self::PreviousPeriodOpen { .. } => "PREVIOUS_PERIOD_OPEN",
            Self::DraftEntriesRemain { .. } => "DRAFT_ENTRIES_REMAIN",
            Self::PeriodLocked(_) => "PERIOD_LOCKED",
            Self::ReopenReasonTooShort { .. } => "REOPEN_REASON_TOO_SHORT",
            Self::BalanceRecalculation(_) => "BALANCE_RECALCULATION_FAILED",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidMonth(_)
            | Self::InvalidStatusTransition { .. }
            | Self::PreviousPeriodOpen { .. }
            | Self::DraftEntriesRemain { .. }
            | Self::PeriodLocked(_)
            | Self::ReopenReasonTooShort { .. } => 400,
            Self::NotFound(_) => 404,
            Self::DuplicatePeriod(_) => 409,
            Self::BalanceRecalculation(err) => err.http_status_code(),
            Self::Storage(_) => 500,
        }
    }
}
