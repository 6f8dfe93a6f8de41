//! Chart of accounts repository interface.

use async_trait::async_trait;
use meridian_core::registry::Account;
use meridian_shared::types::AccountId;

use crate::error::RepoError;

/// Persistence operations for chart of accounts entries.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds an account by id.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepoError>;

    /// Finds an account by code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Account>, RepoError>;

    /// Lists the direct children of an account.
    async fn find_children(&self, parent_id: AccountId) -> Result<Vec<Account>, RepoError>;

    /// Lists all accounts.
    async fn list(&self) -> Result<Vec<Account>, RepoError>;

    /// Returns true when any journal line references the account.
    async fn has_postings(&self, id: AccountId) -> Result<bool, RepoError>;

    /// Inserts or updates an account.
    async fn save(&self, account: &Account) -> Result<(), RepoError>;

    /// Deletes an account.
    async fn delete(&self, id: AccountId) -> Result<(), RepoError>;
}
