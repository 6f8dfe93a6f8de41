//! Double-entry journal.
//!
//! This module implements the journal entry aggregate and its rules:
//! - Balanced debit/credit lines (at least two, all amounts positive)
//! - Draft → Posted → Voided lifecycle
//! - Entry numbers sequenced per fiscal period
//! - Pure validation with injected account lookup
//! - Error types for journal operations

pub mod entry;
pub mod error;
pub mod types;
pub mod validation;

pub use entry::{Direction, EntryStatus, JournalEntry, JournalLine};
pub use error::JournalError;
pub use types::{CreateJournalEntryInput, EntryTotals, JournalLineInput, UpdateJournalEntryInput};
pub use validation::{validate_lines, PostingAccount};
