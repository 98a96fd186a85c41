//! Service center directory.

use serde::{Deserialize, Serialize};

/// A service center the owner can book a repair at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCenter {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub manager: String,
}

/// A static, enumerable list of recognized service centers.
///
/// Used both to validate `center_id` before a booking request goes out and
/// to populate the selection UI.
pub trait CenterDirectory: Send + Sync {
    /// All known centers, in display order.
    fn all(&self) -> &[ServiceCenter];

    /// Looks a center up by id.
    fn find(&self, center_id: &str) -> Option<&ServiceCenter> {
        self.all().iter().find(|c| c.id == center_id)
    }
}
