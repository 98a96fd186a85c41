//! Login wire format.

use serde::{Deserialize, Serialize};

/// Request body for `POST /login`. Role is `"dealer"` or `"user"` on the
/// wire (owners log in as `"user"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequestDto {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// One vehicle as it appears in the owner's login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDto {
    pub chassis_number: String,
    pub model: String,
    #[serde(default)]
    pub dealer_id: Option<String>,
}

/// Owner profile carried in the login response `data` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerProfileDto {
    #[serde(default)]
    pub username: Option<String>,
    pub full_name: String,
    #[serde(default)]
    pub vehicles: Vec<VehicleDto>,
}

/// Dealer snapshot carried in the login response `data` field. Inventory
/// and sales records stay untyped; the client renders them as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerProfileDto {
    pub dealer_id: String,
    pub full_name: String,
    #[serde(default)]
    pub inventory: Vec<serde_json::Value>,
    #[serde(default)]
    pub sold_vehicles: Vec<serde_json::Value>,
}

/// Response body for `POST /login`.
///
/// `data` stays untyped here: its shape depends on `role` (owner profile vs
/// dealer snapshot) and the auth adapter picks the right projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponseDto {
    pub role: String,
    pub data: serde_json::Value,
}
