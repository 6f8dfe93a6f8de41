//! Bank reconciliation.
//!
//! This module implements the reconciliation aggregate and the statement
//! matching algorithm:
//! - Reconciliation lifecycle (Draft → InProgress → Completed → Approved)
//! - Bank transaction match state
//! - Reconciling items and adjusted bank/book balances
//! - Pluggable auto-match strategy (amount + date proximity by default)

pub mod error;
pub mod matching;
pub mod types;

pub use error::ReconciliationError;
pub use matching::{AmountDateMatcher, MatchCandidate, MatchConfig, MatchProposal, MatchStrategy};
pub use types::{
    AdjustedBalances, AdjustmentSide, BankAccount, BankReconciliation, BankTransaction,
    MatchState, ReconciliationStatus, ReconcilingItem, ReconcilingItemKind,
};
