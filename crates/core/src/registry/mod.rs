//! Chart of accounts.
//!
//! This module implements account classification and the account aggregate:
//! - Code-range classification into type, category, and normal balance
//! - Header vs. detail accounts (only detail accounts accept postings)
//! - System-protected accounts with immutable codes
//! - Error types for registry operations

pub mod account;
pub mod classification;
pub mod error;

pub use account::Account;
pub use classification::{classify, AccountCategory, AccountType, Classification, NormalBalance};
pub use error::RegistryError;
