//! Fiscal period aggregate and transitions.

use chrono::{DateTime, Utc};
use meridian_shared::types::{FiscalPeriodId, PeriodRef, UserId};
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// Minimum length of a reopen reason.
pub const MIN_REOPEN_REASON_LEN: usize = 10;

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period accepts new postings.
    Open,
    /// Period is closed; balances are snapshotted, no new postings.
    Closed,
    /// Period is locked; terminal except via administrative unlock.
    Locked,
}

/// A calendar accounting period with its lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// The (year, month) pair identifying this period.
    pub period: PeriodRef,
    /// Current status.
    pub status: PeriodStatus,
    /// User who closed the period.
    pub closed_by: Option<UserId>,
    /// When the period was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// User who reopened the period.
    pub reopened_by: Option<UserId>,
    /// When the period was reopened.
    pub reopened_at: Option<DateTime<Utc>>,
    /// Why the period was reopened.
    pub reopen_reason: Option<String>,
    /// User who locked the period.
    pub locked_by: Option<UserId>,
    /// When the period was locked.
    pub locked_at: Option<DateTime<Utc>>,
    /// When the period record was created.
    pub created_at: DateTime<Utc>,
    /// When the period record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FiscalPeriod {
    /// Creates a new open period.
    #[must_use]
    pub fn new(period: PeriodRef, now: DateTime<Utc>) -> Self {
        Self {
            id: FiscalPeriodId::new(),
            period,
            status: PeriodStatus::Open,
            closed_by: None,
            closed_at: None,
            reopened_by: None,
            reopened_at: None,
            reopen_reason: None,
            locked_by: None,
            locked_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if new postings may target this period.
    #[must_use]
    pub fn accepts_postings(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Closes the period.
    ///
    /// Closing requires:
    /// - the period is currently Open (Locked periods are terminal)
    /// - the immediately preceding period is Closed or Locked, or does not
    ///   exist (first-period exception)
    /// - no draft journal entries remain in the period
    ///
    /// # Errors
    ///
    /// Returns `FiscalError` when any precondition fails.
    pub fn close(
        &mut self,
        previous_status: Option<PeriodStatus>,
        draft_entries: u64,
        by: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), FiscalError> {
        match self.status {
            PeriodStatus::Open => {}
            PeriodStatus::Locked => return Err(FiscalError::PeriodLocked(self.period)),
            PeriodStatus::Closed => {
                return Err(FiscalError::InvalidStatusTransition {
                    from: self.status,
                    to: PeriodStatus::Closed,
                })
            }
        }

        if previous_status == Some(PeriodStatus::Open) {
            return Err(FiscalError::PreviousPeriodOpen {
                period: self.period,
                previous: self.period.prev(),
            });
        }

        if draft_entries > 0 {
            return Err(FiscalError::DraftEntriesRemain {
                period: self.period,
                count: draft_entries,
            });
        }

        self.status = PeriodStatus::Closed;
        self.closed_by = Some(by);
        self.closed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Reopens a closed period with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns `PeriodLocked` for locked periods, an invalid-transition
    /// error for open ones, and `ReopenReasonTooShort` when the reason is
    /// under [`MIN_REOPEN_REASON_LEN`] characters.
    pub fn reopen(
        &mut self,
        reason: impl Into<String>,
        by: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), FiscalError> {
        match self.status {
            PeriodStatus::Closed => {}
            PeriodStatus::Locked => return Err(FiscalError::PeriodLocked(self.period)),
            PeriodStatus::Open => {
                return Err(FiscalError::InvalidStatusTransition {
                    from: self.status,
                    to: PeriodStatus::Open,
                })
            }
        }

        let reason = reason.into();
        let trimmed = reason.trim();
        if trimmed.chars().count() < MIN_REOPEN_REASON_LEN {
            return Err(FiscalError::ReopenReasonTooShort {
                actual: trimmed.chars().count(),
                min: MIN_REOPEN_REASON_LEN,
            });
        }

        self.status = PeriodStatus::Open;
        self.reopened_by = Some(by);
        self.reopened_at = Some(now);
        self.reopen_reason = Some(reason);
        self.updated_at = now;
        Ok(())
    }

    /// Locks a closed period.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the period is Closed.
    pub fn lock(&mut self, by: UserId, now: DateTime<Utc>) -> Result<(), FiscalError> {
        if self.status != PeriodStatus::Closed {
            return Err(FiscalError::InvalidStatusTransition {
                from: self.status,
                to: PeriodStatus::Locked,
            });
        }

        self.status = PeriodStatus::Locked;
        self.locked_by = Some(by);
        self.locked_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}
