//! Shared types and configuration for the Meridian ledger core.
//!
//! This crate provides common types used across the other crates:
//! - Typed IDs for type-safe entity references
//! - Fiscal period references (year/month value type)
//! - Configuration management for ledger tunables

pub mod config;
pub mod types;

pub use config::LedgerConfig;
