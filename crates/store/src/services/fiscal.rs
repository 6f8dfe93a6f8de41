//! Fiscal period management service.

use std::sync::Arc;

use chrono::Utc;
use meridian_core::fiscal::{FiscalError, FiscalPeriod};
use meridian_core::journal::EntryStatus;
use meridian_shared::types::{PeriodRef, UserId};

use super::balances::BalanceService;
use crate::repo::{FiscalPeriodRepository, JournalRepository};

/// Fiscal period management service: create, close, reopen, lock.
pub struct FiscalPeriodService {
    periods: Arc<dyn FiscalPeriodRepository>,
    journal: Arc<dyn JournalRepository>,
    balances: Arc<BalanceService>,
}

impl FiscalPeriodService {
    /// Creates a new fiscal period service.
    #[must_use]
    pub fn new(
        periods: Arc<dyn FiscalPeriodRepository>,
        journal: Arc<dyn JournalRepository>,
        balances: Arc<BalanceService>,
    ) -> Self {
        Self {
            periods,
            journal,
            balances,
        }
    }

    /// Creates an open period for (year, month).
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for months outside 1-12 and
    /// `DuplicatePeriod` when the pair already exists.
    pub async fn create_period(&self, year: i32, month: u32) -> Result<FiscalPeriod, FiscalError> {
        let period = PeriodRef::new(year, month)?;

        if self.periods.find_by_period(period).await?.is_some() {
            return Err(FiscalError::DuplicatePeriod(period));
        }

        let record = FiscalPeriod::new(period, Utc::now());
        self.periods.save(&record).await?;

        tracing::info!(period = %period, "fiscal period created");
        Ok(record)
    }

    /// Closes a period and recalculates its balance snapshots.
    ///
    /// The period's status is re-read inside this call, so two racing
    /// closes cannot both succeed: the second sees Closed and fails the
    /// transition check.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError` when the period is unknown, the predecessor
    /// is still open, draft entries remain, or the transition is invalid.
    pub async fn close_period(
        &self,
        period: PeriodRef,
        by: UserId,
    ) -> Result<FiscalPeriod, FiscalError> {
        let mut record = self.get_period(period).await?;

        let previous_status = self
            .periods
            .find_by_period(period.prev())
            .await?
            .map(|previous| previous.status);
        let drafts = self
            .journal
            .count_by_status(period, EntryStatus::Draft)
            .await?;

        record.close(previous_status, drafts, by, Utc::now())?;
        self.periods.save(&record).await?;
        self.balances.recalculate(period).await?;

        tracing::info!(period = %period, closed_by = %by, "fiscal period closed");
        Ok(record)
    }

    /// Reopens a closed period with a reason of at least 10 characters.
    ///
    /// # Errors
    ///
    /// Returns `PeriodLocked` for locked periods and
    /// `ReopenReasonTooShort` for thin reasons.
    pub async fn reopen_period(
        &self,
        period: PeriodRef,
        by: UserId,
        reason: &str,
    ) -> Result<FiscalPeriod, FiscalError> {
        let mut record = self.get_period(period).await?;
        record.reopen(reason, by, Utc::now())?;
        self.periods.save(&record).await?;

        tracing::info!(period = %period, reopened_by = %by, reason, "fiscal period reopened");
        Ok(record)
    }

    /// Locks a closed period.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the period is Closed.
    pub async fn lock_period(
        &self,
        period: PeriodRef,
        by: UserId,
    ) -> Result<FiscalPeriod, FiscalError> {
        let mut record = self.get_period(period).await?;
        record.lock(by, Utc::now())?;
        self.periods.save(&record).await?;

        tracing::info!(period = %period, locked_by = %by, "fiscal period locked");
        Ok(record)
    }

    /// Fetches a period by its (year, month) pair.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown periods.
    pub async fn get_period(&self, period: PeriodRef) -> Result<FiscalPeriod, FiscalError> {
        self.periods
            .find_by_period(period)
            .await?
            .ok_or(FiscalError::NotFound(period))
    }

    /// Lists all periods in chronological order.
    pub async fn list_periods(&self) -> Result<Vec<FiscalPeriod>, FiscalError> {
        Ok(self.periods.list().await?)
    }
}
