//! Processed-event ledger interface.
//!
//! Handlers reacting to externally-sourced events consult this ledger
//! before acting and record the outcome afterwards, so at-least-once
//! delivery never double-posts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meridian_shared::types::JournalEntryId;
use serde::{Deserialize, Serialize};

use crate::error::RepoError;

/// Outcome of processing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// The domain action completed and its artifacts were persisted.
    Succeeded,
    /// The domain action failed; the message records why.
    Failed,
}

/// Audit record for one processed event id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedEvent {
    /// The external event id (idempotency key).
    pub event_id: String,
    /// The subsystem that emitted the event.
    pub source_service: String,
    /// Success or failure.
    pub outcome: EventOutcome,
    /// The journal entry created on success.
    pub journal_entry_id: Option<JournalEntryId>,
    /// The error message on failure.
    pub error_message: Option<String>,
    /// When the event was processed.
    pub processed_at: DateTime<Utc>,
}

/// Persistence operations for the processed-event ledger.
#[async_trait]
pub trait ProcessedEventRepository: Send + Sync {
    /// Finds the record for an event id.
    async fn find(&self, event_id: &str) -> Result<Option<ProcessedEvent>, RepoError>;

    /// Records (or overwrites) the outcome for an event id.
    async fn record(&self, event: &ProcessedEvent) -> Result<(), RepoError>;
}
