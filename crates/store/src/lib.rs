//! Persistence boundary and domain services for the Meridian ledger core.
//!
//! This crate defines the repository interfaces the ledger core consumes
//! (implementations live with the host platform's persistence engine) and
//! the domain services that orchestrate multi-step workflows across them.
//!
//! All domain decisions are delegated to `meridian-core`; the services here
//! sequence repository calls, which are the only suspension points.

pub mod error;
pub mod repo;
pub mod services;

pub use error::RepoError;
