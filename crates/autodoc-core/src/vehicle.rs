//! Vehicle identity and ownership facts.

use autodoc_types::VehicleDto;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chassis number (VIN). The canonical vehicle key across telemetry,
/// booking, and the session's garage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(vin: impl Into<String>) -> Self {
        Self(vin.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(vin: &str) -> Self {
        Self(vin.to_string())
    }
}

/// A vehicle owned by the session's user.
///
/// Immutable once assigned to an owner; assignment itself happens through
/// the dealer workflow, which is an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vin: VehicleId,
    pub model: String,
    /// Owning dealer reference, used as `dealer_name` in booking requests.
    pub dealer_id: Option<String>,
}

impl From<VehicleDto> for Vehicle {
    fn from(dto: VehicleDto) -> Self {
        Self {
            vin: VehicleId::new(dto.chassis_number),
            model: dto.model,
            dealer_id: dto.dealer_id,
        }
    }
}
