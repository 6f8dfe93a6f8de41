//! Fixed assets.
//!
//! This module implements the fixed asset register:
//! - Asset aggregate with acquisition data and lifecycle status
//! - Asset categories carrying the GL account wiring
//! - Monthly depreciation (straight-line and declining-balance)
//! - Depreciation runs per fiscal period
//! - Disposal and write-off with gain/loss derivation
//! - Maintenance records

pub mod asset;
pub mod category;
pub mod depreciation;
pub mod disposal;
pub mod error;
pub mod maintenance;

pub use asset::{AssetStatus, DepreciationMethod, FixedAsset, NewFixedAsset};
pub use category::AssetCategory;
pub use depreciation::{
    compute_charge, monthly_depreciation, DepreciationCharge, DepreciationRun,
    DepreciationRunLine, RunStatus,
};
pub use disposal::{compute_disposal, disposal_lines, DisposalAccounts, DisposalOutcome};
pub use error::AssetError;
pub use maintenance::AssetMaintenance;
