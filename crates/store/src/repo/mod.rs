//! Repository interfaces consumed by the domain services.
//!
//! Implementations live with the host platform's persistence engine. Every
//! `save` is atomic per aggregate: a journal entry and its lines, or a
//! reconciliation and its items, are written as one unit or not at all.

pub mod accounts;
pub mod assets;
pub mod balances;
pub mod banking;
pub mod events;
pub mod fiscal;
pub mod journal;

pub use accounts::AccountRepository;
pub use assets::{
    AssetCategoryRepository, AssetMaintenanceRepository, DepreciationRunRepository,
    FixedAssetRepository,
};
pub use balances::BalanceRepository;
pub use banking::{BankAccountRepository, BankTransactionRepository, ReconciliationRepository};
pub use events::{EventOutcome, ProcessedEvent, ProcessedEventRepository};
pub use fiscal::FiscalPeriodRepository;
pub use journal::JournalRepository;
