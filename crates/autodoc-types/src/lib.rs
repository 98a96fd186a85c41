//! Wire-level DTOs shared between the AutoDoc client layers.
//!
//! These structs mirror the JSON the fleet backend speaks. They carry no
//! behavior beyond serde derives; validation and mapping into domain types
//! happens in `autodoc-core`.

mod booking_dto;
mod session_dto;
mod telemetry_dto;

pub use booking_dto::{BookingConfirmation, BookingListResponse, BookingRequestDto};
pub use session_dto::{
    DealerProfileDto, LoginRequestDto, LoginResponseDto, OwnerProfileDto, VehicleDto,
};
pub use telemetry_dto::TelemetryFrame;
