//! Idempotent event-driven posting.
//!
//! Other subsystems emit events ("order completed", "payment received")
//! that should each produce exactly one posted journal entry. Delivery is
//! at-least-once, so the handler runs an explicit three-step protocol:
//! consult the processed-event ledger, run the domain action, record the
//! outcome. The steps stay visible here rather than hiding in middleware
//! so failure audits read straight off the ledger.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use meridian_core::journal::{CreateJournalEntryInput, JournalError, JournalLineInput};
use meridian_shared::types::{JournalEntryId, UserId};
use thiserror::Error;

use super::journal::JournalService;
use crate::error::RepoError;
use crate::repo::{EventOutcome, ProcessedEvent, ProcessedEventRepository};

/// An inbound event carrying enough data to build a journal entry.
#[derive(Debug, Clone)]
pub struct PostingEvent {
    /// Globally unique event id (the idempotency key).
    pub event_id: String,
    /// The subsystem that emitted the event.
    pub source_service: String,
    /// Stable reference within the source (e.g. an order number).
    pub source_reference: String,
    /// The entry date.
    pub entry_date: NaiveDate,
    /// Description for the generated entry.
    pub description: String,
    /// Balanced line inputs.
    pub lines: Vec<JournalLineInput>,
    /// The user (or service principal) the entry is attributed to.
    pub actor: UserId,
}

/// Errors from event-driven posting.
#[derive(Debug, Error)]
pub enum EventError {
    /// The journal rejected the entry.
    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    /// Storage error from the persistence boundary.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RepoError> for EventError {
    fn from(err: RepoError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Idempotent handler for posting events.
pub struct EventService {
    processed: Arc<dyn ProcessedEventRepository>,
    journal: Arc<JournalService>,
}

impl EventService {
    /// Creates a new event service.
    #[must_use]
    pub fn new(processed: Arc<dyn ProcessedEventRepository>, journal: Arc<JournalService>) -> Self {
        Self { processed, journal }
    }

    /// Handles a posting event exactly once per event id.
    ///
    /// Replays of a previously succeeded event return the recorded entry
    /// without posting again. A previously failed event is retried, and
    /// the ledger record is overwritten with the new outcome. Failures are
    /// recorded with their message before the error propagates.
    ///
    /// # Errors
    ///
    /// Returns `EventError` when the domain action or the ledger itself
    /// fails.
    pub async fn handle_posting_event(
        &self,
        event: PostingEvent,
    ) -> Result<JournalEntryId, EventError> {
        // Step 1: consult the processed-event ledger.
        if let Some(record) = self.processed.find(&event.event_id).await? {
            if record.outcome == EventOutcome::Succeeded {
                if let Some(entry_id) = record.journal_entry_id {
                    tracing::debug!(
                        event_id = %event.event_id,
                        entry_id = %entry_id,
                        "event already processed, skipping"
                    );
                    return Ok(entry_id);
                }
            }
        }

        // Step 2: run the domain action.
        let result = self.post_event_entry(&event).await;

        // Step 3: record the outcome against the event id.
        match result {
            Ok(entry_id) => {
                self.processed
                    .record(&ProcessedEvent {
                        event_id: event.event_id.clone(),
                        source_service: event.source_service.clone(),
                        outcome: EventOutcome::Succeeded,
                        journal_entry_id: Some(entry_id),
                        error_message: None,
                        processed_at: Utc::now(),
                    })
                    .await?;

                tracing::info!(
                    event_id = %event.event_id,
                    entry_id = %entry_id,
                    source = %event.source_service,
                    "event posted"
                );
                Ok(entry_id)
            }
            Err(err) => {
                self.processed
                    .record(&ProcessedEvent {
                        event_id: event.event_id.clone(),
                        source_service: event.source_service.clone(),
                        outcome: EventOutcome::Failed,
                        journal_entry_id: None,
                        error_message: Some(err.to_string()),
                        processed_at: Utc::now(),
                    })
                    .await?;

                tracing::warn!(
                    event_id = %event.event_id,
                    source = %event.source_service,
                    error = %err,
                    "event posting failed"
                );
                Err(err.into())
            }
        }
    }

    /// Creates and immediately posts the entry for an event.
    async fn post_event_entry(&self, event: &PostingEvent) -> Result<JournalEntryId, JournalError> {
        let entry = self
            .journal
            .create_entry(CreateJournalEntryInput {
                entry_date: event.entry_date,
                description: event.description.clone(),
                reference: Some(event.source_reference.clone()),
                notes: None,
                source_service: Some(event.source_service.clone()),
                source_reference: Some(event.source_reference.clone()),
                lines: event.lines.clone(),
                created_by: event.actor,
            })
            .await?;
        let entry = self.journal.post_entry(entry.id, event.actor).await?;
        Ok(entry.id)
    }
}
