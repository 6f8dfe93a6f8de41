//! Core accounting logic for the Meridian ledger.
//!
//! This crate contains the pure domain rules of the financial ledger:
//! - Chart-of-accounts classification and account aggregates
//! - Balanced journal entries and their lifecycle
//! - Fiscal period state machine (open/close/lock/reopen)
//! - Account balance derivation and trial balance aggregation
//! - Bank reconciliation, reconciling items, and statement matching
//! - Fixed asset depreciation and disposal
//!
//! Everything here is synchronous and deterministic given its inputs. The
//! persistence boundary lives in `meridian-store`.

pub mod assets;
pub mod balance;
pub mod fiscal;
pub mod journal;
pub mod reconciliation;
pub mod registry;
