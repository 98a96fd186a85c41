//! Booking domain types and the remote booking collaborator.

use crate::vehicle::VehicleId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A confirmed service booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: String,
    pub vehicle_id: VehicleId,
    pub failure_type: String,
    pub center_id: String,
    pub created_at: DateTime<Utc>,
}

/// What the booking service needs to raise a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub vehicle_id: VehicleId,
    pub owner_name: String,
    pub issue: String,
    pub dealer_name: String,
    pub center_id: String,
}

/// Booking-time failures. All recoverable: the caller may retry (same or
/// different center); the core never retries on its own.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookingError {
    /// No actionable alert currently exists for the vehicle (or the failure
    /// type no longer matches).
    #[error("no active alert eligible for booking")]
    NoActiveAlert,

    /// The service center identifier is not in the directory.
    #[error("unknown service center '{center_id}'")]
    InvalidCenter { center_id: String },

    /// The remote booking call failed.
    #[error("booking rejected by server: {reason}")]
    ServerRejected { reason: String },
}

/// An abstract remote booking service.
///
/// Implementations perform exactly one network request per call; idempotence
/// across repeated `book()` attempts is the coordinator's job, not theirs.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Submits a booking request and returns the confirmed ticket.
    async fn submit(&self, request: &BookingRequest) -> Result<Ticket, BookingError>;

    /// Lists confirmed bookings for a service center (manager view).
    async fn bookings_for_center(&self, center_id: &str) -> crate::Result<Vec<Ticket>>;
}
