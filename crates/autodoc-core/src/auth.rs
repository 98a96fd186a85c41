//! Session/auth collaborator trait.
//!
//! Credential correctness is out of scope for this client; the provider
//! only supplies the authenticated identity, role, and ownership facts.

use crate::Result;
use crate::session::{Session, SessionRole};
use async_trait::async_trait;

/// An abstract login provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authenticates and returns a freshly created [`Session`].
    ///
    /// # Errors
    ///
    /// Returns `Auth` on rejected credentials and `Transport` when the
    /// provider cannot be reached.
    async fn login(&self, username: &str, password: &str, role: SessionRole) -> Result<Session>;
}
