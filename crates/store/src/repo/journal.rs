//! Journal entry repository interface.

use async_trait::async_trait;
use meridian_core::balance::AccountActivity;
use meridian_core::journal::{EntryStatus, JournalEntry, JournalLine};
use meridian_shared::types::{AccountId, JournalEntryId, JournalLineId, PeriodRef};

use crate::error::RepoError;

/// Persistence operations for journal entries.
///
/// Entries and their lines are one aggregate: `save` writes both as a
/// single unit. The aggregation queries over posted lines back the balance
/// calculator (the core never walks raw lines itself).
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Finds an entry by id.
    async fn find_by_id(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, RepoError>;

    /// Finds an entry by its period-scoped entry number.
    async fn find_by_entry_number(
        &self,
        period: PeriodRef,
        entry_number: i64,
    ) -> Result<Option<JournalEntry>, RepoError>;

    /// Finds an entry generated by another subsystem via its source
    /// reference.
    async fn find_by_source_reference(
        &self,
        source_service: &str,
        source_reference: &str,
    ) -> Result<Option<JournalEntry>, RepoError>;

    /// Finds the entry containing a given line.
    async fn find_line(
        &self,
        line_id: JournalLineId,
    ) -> Result<Option<(JournalEntry, JournalLine)>, RepoError>;

    /// Lists entries for a period.
    async fn list_for_period(&self, period: PeriodRef) -> Result<Vec<JournalEntry>, RepoError>;

    /// Returns the next entry number for a period. Numbers are strictly
    /// increasing within the period.
    async fn next_entry_number(&self, period: PeriodRef) -> Result<i64, RepoError>;

    /// Counts entries in a period with the given status.
    async fn count_by_status(
        &self,
        period: PeriodRef,
        status: EntryStatus,
    ) -> Result<u64, RepoError>;

    /// Aggregates posted debit/credit totals per account over a period.
    async fn activity_for_period(
        &self,
        period: PeriodRef,
    ) -> Result<Vec<AccountActivity>, RepoError>;

    /// Aggregates posted debit/credit totals for one account over a period.
    async fn account_activity(
        &self,
        account_id: AccountId,
        period: PeriodRef,
    ) -> Result<Option<AccountActivity>, RepoError>;

    /// Inserts or updates an entry with its lines, atomically.
    async fn save(&self, entry: &JournalEntry) -> Result<(), RepoError>;

    /// Deletes an entry and its lines.
    async fn delete(&self, id: JournalEntryId) -> Result<(), RepoError>;
}
