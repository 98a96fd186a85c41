//! Domain layer of the AutoDoc fleet client.
//!
//! Entities, the risk classifier, the shared error type, and the
//! collaborator traits implemented by `autodoc-infrastructure`. Nothing in
//! this crate performs I/O.

pub mod auth;
pub mod booking;
pub mod center;
pub mod classifier;
pub mod error;
pub mod session;
pub mod telemetry;
pub mod vehicle;

// Re-export common error type
pub use error::{FleetError, Result};
