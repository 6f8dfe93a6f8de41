//! Journal ledger service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use meridian_core::journal::{
    validate_lines, CreateJournalEntryInput, JournalEntry, JournalError, JournalLineInput,
    PostingAccount, UpdateJournalEntryInput,
};
use meridian_shared::types::{AccountId, JournalEntryId, PeriodRef, UserId};

use crate::repo::{AccountRepository, FiscalPeriodRepository, JournalRepository};

/// Journal ledger service: creation, editing, posting, and voiding of
/// balanced journal entries.
pub struct JournalService {
    journal: Arc<dyn JournalRepository>,
    accounts: Arc<dyn AccountRepository>,
    periods: Arc<dyn FiscalPeriodRepository>,
}

impl JournalService {
    /// Creates a new journal service.
    #[must_use]
    pub fn new(
        journal: Arc<dyn JournalRepository>,
        accounts: Arc<dyn AccountRepository>,
        periods: Arc<dyn FiscalPeriodRepository>,
    ) -> Self {
        Self {
            journal,
            accounts,
            periods,
        }
    }

    /// Creates a draft entry after validating accounts and balance, and
    /// assigns the next entry number in the entry date's period.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` when validation fails or the period no
    /// longer accepts postings.
    pub async fn create_entry(
        &self,
        input: CreateJournalEntryInput,
    ) -> Result<JournalEntry, JournalError> {
        let period = PeriodRef::from_date(input.entry_date);
        self.ensure_period_accepts_postings(period).await?;
        self.validate_against_accounts(&input.lines).await?;

        let entry_number = self.journal.next_entry_number(period).await?;
        let entry = JournalEntry::from_input(input, entry_number, period, Utc::now());
        self.journal.save(&entry).await?;

        tracing::info!(
            entry_id = %entry.id,
            entry_number,
            period = %period,
            "journal entry created"
        );
        Ok(entry)
    }

    /// Updates a draft entry. Replacing lines re-runs full validation; a
    /// date change into another period reassigns the entry number.
    ///
    /// # Errors
    ///
    /// Returns `NotEditable` for posted/voided entries.
    pub async fn update_entry(
        &self,
        id: JournalEntryId,
        update: UpdateJournalEntryInput,
    ) -> Result<JournalEntry, JournalError> {
        let mut entry = self.get_entry(id).await?;
        if !entry.status.is_editable() {
            return Err(JournalError::NotEditable(id));
        }

        if let Some(entry_date) = update.entry_date {
            let new_period = PeriodRef::from_date(entry_date);
            if new_period != entry.period {
                self.ensure_period_accepts_postings(new_period).await?;
                entry.entry_number = self.journal.next_entry_number(new_period).await?;
                entry.period = new_period;
            }
            entry.entry_date = entry_date;
        }
        if let Some(description) = update.description {
            entry.description = description;
        }
        if let Some(reference) = update.reference {
            entry.reference = reference;
        }
        if let Some(notes) = update.notes {
            entry.notes = notes;
        }
        if let Some(lines) = update.lines {
            self.validate_against_accounts(&lines).await?;
            entry.lines = JournalEntry::build_lines(lines);
        }

        entry.updated_at = Utc::now();
        self.journal.save(&entry).await?;
        Ok(entry)
    }

    /// Deletes a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `NotDeletable` for posted/voided entries.
    pub async fn delete_entry(&self, id: JournalEntryId) -> Result<(), JournalError> {
        let entry = self.get_entry(id).await?;
        if !entry.status.is_editable() {
            return Err(JournalError::NotDeletable(id));
        }
        self.journal.delete(id).await?;
        Ok(())
    }

    /// Posts a draft entry, re-checking the period and the balance.
    ///
    /// # Errors
    ///
    /// Returns `NotPostable` for non-draft entries, `UnbalancedEntry` when
    /// debits differ from credits, and `PeriodNotOpen` when the period has
    /// closed since drafting.
    pub async fn post_entry(
        &self,
        id: JournalEntryId,
        by: UserId,
    ) -> Result<JournalEntry, JournalError> {
        let mut entry = self.get_entry(id).await?;
        self.ensure_period_accepts_postings(entry.period).await?;

        entry.post(by, Utc::now())?;
        self.journal.save(&entry).await?;

        tracing::info!(
            entry_id = %entry.id,
            entry_number = entry.entry_number,
            period = %entry.period,
            "journal entry posted"
        );
        Ok(entry)
    }

    /// Voids a posted entry with a mandatory reason. The entry and its
    /// lines stay in history.
    ///
    /// # Errors
    ///
    /// Returns `NotVoidable` unless the entry is posted.
    pub async fn void_entry(
        &self,
        id: JournalEntryId,
        by: UserId,
        reason: &str,
    ) -> Result<JournalEntry, JournalError> {
        let mut entry = self.get_entry(id).await?;
        entry.void(by, reason, Utc::now())?;
        self.journal.save(&entry).await?;

        tracing::info!(entry_id = %entry.id, reason, "journal entry voided");
        Ok(entry)
    }

    /// Fetches an entry by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn get_entry(&self, id: JournalEntryId) -> Result<JournalEntry, JournalError> {
        self.journal
            .find_by_id(id)
            .await?
            .ok_or(JournalError::NotFound(id))
    }

    /// Lists the entries of a period.
    pub async fn list_for_period(
        &self,
        period: PeriodRef,
    ) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self.journal.list_for_period(period).await?)
    }

    /// Finds the entry generated for a source reference, if any.
    pub async fn find_by_source(
        &self,
        source_service: &str,
        source_reference: &str,
    ) -> Result<Option<JournalEntry>, JournalError> {
        Ok(self
            .journal
            .find_by_source_reference(source_service, source_reference)
            .await?)
    }

    /// Rejects the operation when a period record exists and is not open.
    /// Dates without a period record are accepted; the period manager
    /// creates records lazily.
    async fn ensure_period_accepts_postings(
        &self,
        period: PeriodRef,
    ) -> Result<(), JournalError> {
        if let Some(record) = self.periods.find_by_period(period).await? {
            if !record.accepts_postings() {
                return Err(JournalError::PeriodNotOpen(period));
            }
        }
        Ok(())
    }

    /// Fetches every referenced account once, then runs the pure line
    /// validation against the in-memory snapshot.
    async fn validate_against_accounts(
        &self,
        lines: &[JournalLineInput],
    ) -> Result<(), JournalError> {
        let mut snapshot: HashMap<AccountId, PostingAccount> = HashMap::new();

        for line in lines {
            if snapshot.contains_key(&line.account_id) {
                continue;
            }
            let account = self
                .accounts
                .find_by_id(line.account_id)
                .await?
                .ok_or(JournalError::AccountNotFound(line.account_id))?;
            snapshot.insert(
                account.id,
                PostingAccount {
                    id: account.id,
                    is_active: account.is_active,
                    is_header: account.is_header,
                },
            );
        }

        validate_lines(lines, |id| {
            snapshot
                .get(&id)
                .copied()
                .ok_or(JournalError::AccountNotFound(id))
        })?;
        Ok(())
    }
}
