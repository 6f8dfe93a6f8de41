//! Fiscal period repository interface.

use async_trait::async_trait;
use chrono::NaiveDate;
use meridian_core::fiscal::FiscalPeriod;
use meridian_shared::types::{FiscalPeriodId, PeriodRef};

use crate::error::RepoError;

/// Persistence operations for fiscal periods.
#[async_trait]
pub trait FiscalPeriodRepository: Send + Sync {
    /// Finds a period by id.
    async fn find_by_id(&self, id: FiscalPeriodId) -> Result<Option<FiscalPeriod>, RepoError>;

    /// Finds a period by its (year, month) pair.
    async fn find_by_period(&self, period: PeriodRef) -> Result<Option<FiscalPeriod>, RepoError>;

    /// Finds the period containing a date.
    async fn find_for_date(&self, date: NaiveDate) -> Result<Option<FiscalPeriod>, RepoError>;

    /// Lists all periods in chronological order.
    async fn list(&self) -> Result<Vec<FiscalPeriod>, RepoError>;

    /// Inserts or updates a period.
    async fn save(&self, period: &FiscalPeriod) -> Result<(), RepoError>;
}
