//! Session role marker.

use serde::{Deserialize, Serialize};

/// The active role of a session.
///
/// On the wire the backend calls owners `"user"`; the client keeps the
/// domain name `Owner` and maps at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionRole {
    #[serde(rename = "dealer")]
    Dealer,
    #[serde(rename = "user")]
    Owner,
}

impl SessionRole {
    /// Wire name used in login requests and the telemetry role marker.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Dealer => "dealer",
            Self::Owner => "user",
        }
    }

    /// Parses a wire role string.
    pub fn from_wire(role: &str) -> Option<Self> {
        match role {
            "dealer" => Some(Self::Dealer),
            "user" => Some(Self::Owner),
            _ => None,
        }
    }
}
