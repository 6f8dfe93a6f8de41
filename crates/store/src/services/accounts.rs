//! Chart of accounts service.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use meridian_core::registry::{Account, RegistryError};
use meridian_shared::types::AccountId;

use crate::repo::AccountRepository;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// 4-digit account code, unique across the chart.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Header accounts aggregate children and reject postings.
    pub is_header: bool,
    /// System accounts keep their code for life.
    pub is_system: bool,
    /// Optional parent account.
    pub parent_id: Option<AccountId>,
}

/// Chart of accounts service.
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
}

impl AccountService {
    /// Creates a new account service.
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Creates an account after validating its code and parent.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` when the code is taken, `ParentNotFound` /
    /// `ParentNotHeader` for bad parents, and `InvalidCode` for malformed
    /// codes.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<Account, RegistryError> {
        if self.accounts.find_by_code(&input.code).await?.is_some() {
            return Err(RegistryError::DuplicateCode(input.code));
        }

        if let Some(parent_id) = input.parent_id {
            let parent = self
                .accounts
                .find_by_id(parent_id)
                .await?
                .ok_or(RegistryError::ParentNotFound(parent_id))?;
            if !parent.is_header {
                return Err(RegistryError::ParentNotHeader(parent_id));
            }
        }

        let mut account = Account::new(
            input.code,
            input.name,
            input.is_header,
            input.is_system,
            input.parent_id,
            Utc::now(),
        )?;
        account.description = input.description;

        self.accounts.save(&account).await?;
        tracing::info!(account_id = %account.id, code = %account.code, "account created");
        Ok(account)
    }

    /// Fetches an account by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, RegistryError> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::NotFound(id))
    }

    /// Fetches an account by code.
    ///
    /// # Errors
    ///
    /// Returns `CodeNotFound` for unknown codes.
    pub async fn get_by_code(&self, code: &str) -> Result<Account, RegistryError> {
        self.accounts
            .find_by_code(code)
            .await?
            .ok_or_else(|| RegistryError::CodeNotFound(code.to_string()))
    }

    /// Changes an account's code, re-deriving its classification.
    ///
    /// # Errors
    ///
    /// Returns `SystemCodeImmutable` for system accounts and
    /// `DuplicateCode` when the new code is taken.
    pub async fn change_code(
        &self,
        id: AccountId,
        new_code: &str,
    ) -> Result<Account, RegistryError> {
        let mut account = self.get_account(id).await?;

        if let Some(existing) = self.accounts.find_by_code(new_code).await? {
            if existing.id != id {
                return Err(RegistryError::DuplicateCode(new_code.to_string()));
            }
        }

        account.change_code(new_code, Utc::now())?;
        self.accounts.save(&account).await?;
        Ok(account)
    }

    /// Renames an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn rename(
        &self,
        id: AccountId,
        name: &str,
        description: Option<String>,
    ) -> Result<Account, RegistryError> {
        let mut account = self.get_account(id).await?;
        account.name = name.to_string();
        account.description = description;
        account.updated_at = Utc::now();
        self.accounts.save(&account).await?;
        Ok(account)
    }

    /// Deactivates an account so it rejects new postings.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn deactivate(&self, id: AccountId) -> Result<Account, RegistryError> {
        let mut account = self.get_account(id).await?;
        account.deactivate(Utc::now());
        self.accounts.save(&account).await?;
        Ok(account)
    }

    /// Deletes an account with no postings and no children.
    ///
    /// # Errors
    ///
    /// Returns `HasPostings` / `HasChildren` when the account is in use.
    pub async fn delete_account(&self, id: AccountId) -> Result<(), RegistryError> {
        let account = self.get_account(id).await?;

        if self.accounts.has_postings(id).await? {
            return Err(RegistryError::HasPostings(account.code));
        }
        if !self.accounts.find_children(id).await?.is_empty() {
            return Err(RegistryError::HasChildren(account.code));
        }

        self.accounts.delete(id).await?;
        tracing::info!(account_id = %id, code = %account.code, "account deleted");
        Ok(())
    }

    /// Lists the direct children of an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn children(&self, id: AccountId) -> Result<Vec<Account>, RegistryError> {
        self.get_account(id).await?;
        Ok(self.accounts.find_children(id).await?)
    }

    /// Walks the subtree rooted at an account, breadth-first.
    ///
    /// A visited set guards against malformed parent cycles in storage.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn subtree(&self, id: AccountId) -> Result<Vec<Account>, RegistryError> {
        let root = self.get_account(id).await?;

        let mut visited: HashSet<AccountId> = HashSet::from([root.id]);
        let mut result = vec![root];
        let mut cursor = 0;

        while cursor < result.len() {
            let parent_id = result[cursor].id;
            cursor += 1;

            for child in self.accounts.find_children(parent_id).await? {
                if visited.insert(child.id) {
                    result.push(child);
                }
            }
        }

        Ok(result)
    }
}
