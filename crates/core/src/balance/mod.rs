//! Account balance calculations.
//!
//! Closing balances derive deterministically from opening balances and
//! period activity via the normal-balance formula. Trial balance
//! aggregation verifies the books stay in balance.

pub mod calculator;
pub mod error;
pub mod trial;

pub use calculator::{closing_balance, AccountActivity, AccountBalance};
pub use error::BalanceError;
pub use trial::{ClosingRow, TrialBalance, TrialBalanceRow};
