//! Session aggregate.

use super::alert::Alert;
use super::role::SessionRole;
use crate::booking::Ticket;
use crate::classifier::AlertDecision;
use crate::error::{FleetError, Result};
use crate::telemetry::TelemetrySample;
use crate::vehicle::{Vehicle, VehicleId};
use serde::{Deserialize, Serialize};

/// The authenticated identity behind a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub username: String,
    pub full_name: String,
}

/// The one live session of the client.
///
/// Created at successful login, destroyed at logout. Owns the selected
/// vehicle, the alert projection, and the ticket projection; the dashboard
/// controller mutates selection/alert state, the booking coordinator
/// mutates ticket state, and nothing else writes here.
///
/// The alert occurrence counter increments whenever a fresh actionable
/// issue appears (none → some, or the failure type changes). Booking
/// idempotence is keyed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    role: SessionRole,
    identity: SessionIdentity,
    vehicles: Vec<Vehicle>,
    selected: Option<VehicleId>,
    alert: Option<Alert>,
    last_decision: AlertDecision,
    occurrence: u64,
    ticket: Option<Ticket>,
    ticket_history: Vec<Ticket>,
}

impl Session {
    /// Creates an owner session with the owned vehicles.
    pub fn new_owner(identity: SessionIdentity, vehicles: Vec<Vehicle>) -> Self {
        Self {
            role: SessionRole::Owner,
            identity,
            vehicles,
            selected: None,
            alert: None,
            last_decision: AlertDecision::None,
            occurrence: 0,
            ticket: None,
            ticket_history: Vec::new(),
        }
    }

    /// Creates a dealer session. Dealers manage stock and never open a
    /// telemetry channel, so the garage stays empty.
    pub fn new_dealer(identity: SessionIdentity) -> Self {
        Self {
            role: SessionRole::Dealer,
            ..Self::new_owner(identity, Vec::new())
        }
    }

    pub fn role(&self) -> SessionRole {
        self.role
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vin: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| &v.vin == vin)
    }

    pub fn owns(&self, vin: &VehicleId) -> bool {
        self.vehicle(vin).is_some()
    }

    pub fn selected(&self) -> Option<&VehicleId> {
        self.selected.as_ref()
    }

    /// Current actionable alert, if the latest sample still qualifies.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Decision from the most recent classified sample.
    pub fn last_decision(&self) -> AlertDecision {
        self.last_decision
    }

    /// Alert occurrence counter. Monotonic for the session lifetime.
    pub fn occurrence(&self) -> u64 {
        self.occurrence
    }

    /// Ticket booked against the current alert occurrence, if any.
    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    /// All tickets confirmed during this session, in booking order.
    /// Historically valid even after their alert clears.
    pub fn ticket_history(&self) -> &[Ticket] {
        &self.ticket_history
    }

    /// Selects a vehicle and resets the alert/ticket projection.
    ///
    /// # Errors
    ///
    /// Returns `UnknownVehicle` when the VIN is not in the garage.
    pub fn select(&mut self, vin: &VehicleId) -> Result<()> {
        if !self.owns(vin) {
            return Err(FleetError::UnknownVehicle {
                vin: vin.to_string(),
            });
        }
        self.selected = Some(vin.clone());
        self.alert = None;
        self.last_decision = AlertDecision::None;
        self.ticket = None;
        Ok(())
    }

    /// Applies one classified sample to the projection.
    ///
    /// An actionable sample with a new failure (or after a clear) starts a
    /// new occurrence and drops the ticket projection; a non-actionable
    /// sample clears both. Ticket history is never touched here.
    pub fn apply_sample(&mut self, sample: &TelemetrySample, decision: AlertDecision) {
        self.last_decision = decision;
        match (decision, &sample.failure) {
            (AlertDecision::Actionable, Some(failure)) => {
                let fresh = self
                    .alert
                    .as_ref()
                    .is_none_or(|alert| alert.failure_type != *failure);
                if fresh {
                    self.occurrence += 1;
                    self.ticket = None;
                }
                self.alert = Alert::from_sample(sample);
            }
            _ => {
                self.alert = None;
                self.ticket = None;
            }
        }
    }

    /// Records a confirmed ticket for the current occurrence.
    pub fn record_ticket(&mut self, ticket: Ticket) {
        self.ticket = Some(ticket.clone());
        self.ticket_history.push(ticket);
    }

    /// Tears the projection down on logout.
    pub fn clear_projection(&mut self) {
        self.selected = None;
        self.alert = None;
        self.last_decision = AlertDecision::None;
        self.ticket = None;
    }
}
