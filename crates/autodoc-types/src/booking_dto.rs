//! Booking wire format for `/book-service` and `/manager/bookings`.

use serde::{Deserialize, Serialize};

/// Request body for `POST /book-service`.
///
/// The backend keys vehicles by `chassis_number` on this endpoint even
/// though telemetry frames carry `vehicle_id`; both hold the VIN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequestDto {
    pub chassis_number: String,
    pub owner_name: String,
    pub issue: String,
    pub dealer_name: String,
    pub center_id: String,
}

/// Confirmed booking as returned by the backend (and listed per center for
/// service managers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub ticket_id: String,
    pub vehicle_id: String,
    pub issue: String,
    pub center_id: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub service_center: Option<String>,
    #[serde(default)]
    pub estimated_wait_time_minutes: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response body for `GET /manager/bookings?center_id=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    #[serde(default)]
    pub bookings: Vec<BookingConfirmation>,
}
