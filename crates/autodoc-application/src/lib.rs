//! Orchestration layer of the AutoDoc client.
//!
//! Wires the domain pipeline together: the per-vehicle `TelemetryChannel`,
//! the `BookingCoordinator` with its at-most-once-per-occurrence guarantee,
//! and the `DashboardSessionController` state machine the view layer talks
//! to.

mod booking;
mod channel;
mod controller;
mod session_usecase;

pub use booking::{BookingCoordinator, BookingStart, PendingBooking};
pub use channel::{ChannelEvent, TelemetryChannel};
pub use controller::{ChannelState, DashboardSessionController};
pub use session_usecase::{ActiveSession, SessionUseCase};
