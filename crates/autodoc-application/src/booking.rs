//! Booking coordinator.
//!
//! Turns an actionable alert plus a chosen service center into a confirmed
//! ticket, enforcing at most one successful booking per alert occurrence.
//! The flow is split into prepare → dispatch → complete so the network call
//! never borrows the session: telemetry keeps flowing while a booking is in
//! flight, and a response for a superseded occurrence is discarded instead
//! of applied.

use autodoc_core::booking::{BookingError, BookingRequest, BookingService, Ticket};
use autodoc_core::center::CenterDirectory;
use autodoc_core::session::Session;
use autodoc_core::vehicle::VehicleId;
use std::sync::Arc;

/// Fallback when the vehicle record carries no dealer reference.
const UNKNOWN_DEALER: &str = "Unknown Dealer";

/// Outcome of [`BookingCoordinator::prepare`].
#[derive(Debug)]
pub enum BookingStart {
    /// The current occurrence already has a ticket; no network call needed.
    AlreadyBooked(Ticket),
    /// Validated and ready to dispatch.
    Dispatch(PendingBooking),
}

/// A validated booking captured against one alert occurrence.
#[derive(Debug, Clone)]
pub struct PendingBooking {
    occurrence: u64,
    request: BookingRequest,
}

impl PendingBooking {
    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    pub fn occurrence(&self) -> u64 {
        self.occurrence
    }
}

pub struct BookingCoordinator {
    service: Arc<dyn BookingService>,
    directory: Arc<dyn CenterDirectory>,
    /// Ticket recorded for an occurrence, keyed by the occurrence counter.
    booked: Option<(u64, Ticket)>,
}

impl BookingCoordinator {
    pub fn new(service: Arc<dyn BookingService>, directory: Arc<dyn CenterDirectory>) -> Self {
        Self {
            service,
            directory,
            booked: None,
        }
    }

    /// Validates a booking attempt against the session's current alert.
    ///
    /// # Errors
    ///
    /// - `NoActiveAlert` when no actionable alert exists for `vehicle_id`
    ///   with a matching `failure_type`
    /// - `InvalidCenter` when `center_id` is not in the directory
    pub fn prepare(
        &self,
        session: &Session,
        vehicle_id: &VehicleId,
        failure_type: &str,
        center_id: &str,
    ) -> Result<BookingStart, BookingError> {
        let alert = session.alert().ok_or(BookingError::NoActiveAlert)?;
        if &alert.vehicle_id != vehicle_id || alert.failure_type != failure_type {
            return Err(BookingError::NoActiveAlert);
        }

        if let Some((occurrence, ticket)) = &self.booked {
            if *occurrence == session.occurrence() {
                tracing::debug!(
                    "occurrence {occurrence} already booked as {}, skipping network call",
                    ticket.ticket_id
                );
                return Ok(BookingStart::AlreadyBooked(ticket.clone()));
            }
        }

        let center = self
            .directory
            .find(center_id)
            .ok_or_else(|| BookingError::InvalidCenter {
                center_id: center_id.to_string(),
            })?;

        let dealer_name = session
            .vehicle(vehicle_id)
            .and_then(|v| v.dealer_id.clone())
            .unwrap_or_else(|| UNKNOWN_DEALER.to_string());
        let request = BookingRequest {
            vehicle_id: vehicle_id.clone(),
            owner_name: session.identity().full_name.clone(),
            issue: alert.failure_type.clone(),
            dealer_name,
            center_id: center.id.clone(),
        };
        Ok(BookingStart::Dispatch(PendingBooking {
            occurrence: session.occurrence(),
            request,
        }))
    }

    /// Performs the remote booking call. Does not touch session state.
    pub async fn dispatch(&self, pending: &PendingBooking) -> Result<Ticket, BookingError> {
        self.service.submit(&pending.request).await
    }

    /// Applies a booking outcome.
    ///
    /// The ticket is recorded only if the occurrence captured at prepare
    /// time is still the session's active one; otherwise the response is
    /// discarded and `NoActiveAlert` is returned.
    pub fn complete(
        &mut self,
        session: &mut Session,
        pending: &PendingBooking,
        outcome: Result<Ticket, BookingError>,
    ) -> Result<Ticket, BookingError> {
        let ticket = outcome?;
        if session.alert().is_none() || pending.occurrence != session.occurrence() {
            tracing::info!(
                "discarding ticket {} for superseded alert occurrence {}",
                ticket.ticket_id,
                pending.occurrence
            );
            return Err(BookingError::NoActiveAlert);
        }
        self.booked = Some((pending.occurrence, ticket.clone()));
        session.record_ticket(ticket.clone());
        Ok(ticket)
    }

    /// Forgets booking state, e.g. when the selection changes.
    pub fn reset(&mut self) {
        self.booked = None;
    }
}
