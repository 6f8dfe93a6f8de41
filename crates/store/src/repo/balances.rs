//! Account balance snapshot repository interface.

use async_trait::async_trait;
use meridian_core::balance::AccountBalance;
use meridian_shared::types::{AccountId, PeriodRef};

use crate::error::RepoError;

/// Persistence operations for account balance snapshots.
#[async_trait]
pub trait BalanceRepository: Send + Sync {
    /// Finds the snapshot for one (account, period) pair.
    async fn find(
        &self,
        account_id: AccountId,
        period: PeriodRef,
    ) -> Result<Option<AccountBalance>, RepoError>;

    /// Lists all snapshots for a period.
    async fn list_for_period(&self, period: PeriodRef) -> Result<Vec<AccountBalance>, RepoError>;

    /// Upserts a batch of snapshots.
    async fn save_all(&self, balances: &[AccountBalance]) -> Result<(), RepoError>;

    /// Removes all snapshots for a period (before recalculation).
    async fn delete_for_period(&self, period: PeriodRef) -> Result<(), RepoError>;
}
