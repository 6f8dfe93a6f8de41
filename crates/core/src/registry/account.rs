//! Account aggregate.

use chrono::{DateTime, Utc};
use meridian_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::classification::{classify, AccountCategory, AccountType, NormalBalance};
use super::error::RegistryError;

/// A chart of accounts entry.
///
/// Header accounts aggregate their children and never carry postings;
/// detail accounts are the only valid posting targets. System accounts are
/// seeded by the platform and keep their code for life.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Fixed-width 4-digit numeric code, unique across the chart.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Account type derived from the code band.
    pub account_type: AccountType,
    /// Category derived from the code sub-range.
    pub category: AccountCategory,
    /// Side on which this account naturally increases.
    pub normal_balance: NormalBalance,
    /// Header accounts aggregate children and reject postings.
    pub is_header: bool,
    /// System accounts are platform-seeded; their codes are immutable.
    pub is_system: bool,
    /// Optional parent account (tree, no cycles).
    pub parent_id: Option<AccountId>,
    /// Inactive accounts reject new postings.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account, classifying its code.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidCode` when the code is malformed.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        is_header: bool,
        is_system: bool,
        parent_id: Option<AccountId>,
        now: DateTime<Utc>,
    ) -> Result<Self, RegistryError> {
        let code = code.into();
        let classification = classify(&code)?;

        Ok(Self {
            id: AccountId::new(),
            code,
            name: name.into(),
            description: None,
            account_type: classification.account_type,
            category: classification.category,
            normal_balance: classification.normal_balance,
            is_header,
            is_system,
            parent_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if journal lines may post to this account.
    #[must_use]
    pub fn accepts_postings(&self) -> bool {
        !self.is_header && self.is_active
    }

    /// Changes the account code, re-deriving its classification.
    ///
    /// # Errors
    ///
    /// Returns `SystemCodeImmutable` for system accounts and `InvalidCode`
    /// for malformed codes.
    pub fn change_code(
        &mut self,
        new_code: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        if self.is_system {
            return Err(RegistryError::SystemCodeImmutable(self.code.clone()));
        }

        let new_code = new_code.into();
        let classification = classify(&new_code)?;

        self.code = new_code;
        self.account_type = classification.account_type;
        self.category = classification.category;
        self.normal_balance = classification.normal_balance;
        self.updated_at = now;
        Ok(())
    }

    /// Deactivates the account so it rejects new postings.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.updated_at = now;
    }

    /// Reactivates the account.
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.updated_at = now;
    }
}
