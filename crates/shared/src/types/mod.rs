//! Common types used across the ledger core.

pub mod id;
pub mod period;

pub use id::*;
pub use period::{InvalidMonth, PeriodRef};
