//! Session domain module.
//!
//! The `Session` aggregate is the single owner of current selection, alert
//! projection, and ticket projection. All mutation goes through its named
//! operations; the view layer only reads.
//!
//! # Module Structure
//!
//! - `model`: the `Session` aggregate and its identity
//! - `alert`: the derived, transient `Alert` projection
//! - `role`: dealer/owner role marker

mod alert;
mod model;
mod role;

// Re-export public API
pub use alert::Alert;
pub use model::{Session, SessionIdentity};
pub use role::SessionRole;
