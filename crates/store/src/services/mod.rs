//! Domain services orchestrating the repository boundary.
//!
//! One service per ledger component, plus the idempotent event handler.
//! Services sequence awaited repository calls; every domain decision is
//! delegated to `meridian-core`.

pub mod accounts;
pub mod balances;
pub mod depreciation;
pub mod events;
pub mod fiscal;
pub mod journal;
pub mod reconciliation;

pub use accounts::{AccountService, CreateAccountInput};
pub use balances::BalanceService;
pub use depreciation::{DepreciationPreview, DepreciationService, DisposalReceipt, DisposeAssetInput};
pub use events::{EventError, EventService, PostingEvent};
pub use fiscal::FiscalPeriodService;
pub use journal::JournalService;
pub use reconciliation::ReconciliationService;
