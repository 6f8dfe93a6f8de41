//! Bank account, bank transaction, and reconciliation repository
//! interfaces.

use async_trait::async_trait;
use meridian_core::reconciliation::{BankAccount, BankReconciliation, BankTransaction};
use meridian_shared::types::{BankAccountId, BankTransactionId, PeriodRef, ReconciliationId};

use crate::error::RepoError;

/// Persistence operations for bank accounts.
#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    /// Finds a bank account by id.
    async fn find_by_id(&self, id: BankAccountId) -> Result<Option<BankAccount>, RepoError>;

    /// Lists all bank accounts.
    async fn list(&self) -> Result<Vec<BankAccount>, RepoError>;

    /// Inserts or updates a bank account.
    async fn save(&self, account: &BankAccount) -> Result<(), RepoError>;
}

/// Persistence operations for bank statement transactions.
#[async_trait]
pub trait BankTransactionRepository: Send + Sync {
    /// Finds a transaction by id.
    async fn find_by_id(
        &self,
        id: BankTransactionId,
    ) -> Result<Option<BankTransaction>, RepoError>;

    /// Lists the unmatched transactions of a bank account.
    async fn list_unmatched(
        &self,
        bank_account_id: BankAccountId,
    ) -> Result<Vec<BankTransaction>, RepoError>;

    /// Inserts or updates a transaction.
    async fn save(&self, transaction: &BankTransaction) -> Result<(), RepoError>;
}

/// Persistence operations for bank reconciliations.
///
/// A reconciliation and its items are one aggregate; `save` writes both as
/// a single unit.
#[async_trait]
pub trait ReconciliationRepository: Send + Sync {
    /// Finds a reconciliation by id.
    async fn find_by_id(
        &self,
        id: ReconciliationId,
    ) -> Result<Option<BankReconciliation>, RepoError>;

    /// Finds the reconciliation for a (bank account, period) pair.
    async fn find_for_period(
        &self,
        bank_account_id: BankAccountId,
        period: PeriodRef,
    ) -> Result<Option<BankReconciliation>, RepoError>;

    /// Inserts or updates a reconciliation with its items, atomically.
    async fn save(&self, reconciliation: &BankReconciliation) -> Result<(), RepoError>;
}
