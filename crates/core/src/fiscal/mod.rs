//! Fiscal period lifecycle.
//!
//! Periods move Open → Closed → Locked, with Closed → Open via reopen.
//! Closing is strictly sequential: a period can close only when its
//! predecessor is closed (or does not exist).

pub mod error;
pub mod period;

pub use error::FiscalError;
pub use period::{FiscalPeriod, PeriodStatus, MIN_REOPEN_REASON_LEN};
