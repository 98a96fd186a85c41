//! Login/logout use case.
//!
//! Entry point the view layer calls to go from credentials to a running
//! session. Owners get a [`DashboardSessionController`] with their first
//! vehicle pre-selected; dealers get the bare session, since dealer
//! workflows never open a telemetry channel.

use crate::controller::DashboardSessionController;
use autodoc_core::auth::AuthProvider;
use autodoc_core::booking::{BookingService, Ticket};
use autodoc_core::center::{CenterDirectory, ServiceCenter};
use autodoc_core::session::{Session, SessionRole};
use autodoc_core::telemetry::TelemetrySource;
use autodoc_core::{FleetError, Result};
use std::sync::Arc;

/// A logged-in session, shaped by role.
pub enum ActiveSession {
    Owner(DashboardSessionController),
    Dealer(Session),
}

impl std::fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner(controller) => {
                f.debug_tuple("Owner").field(controller.session()).finish()
            }
            Self::Dealer(session) => f.debug_tuple("Dealer").field(session).finish(),
        }
    }
}

impl ActiveSession {
    pub fn session(&self) -> &Session {
        match self {
            Self::Owner(controller) => controller.session(),
            Self::Dealer(session) => session,
        }
    }
}

/// Builds sessions from credentials and hands out shared read services.
pub struct SessionUseCase {
    auth: Arc<dyn AuthProvider>,
    telemetry: Arc<dyn TelemetrySource>,
    booking: Arc<dyn BookingService>,
    centers: Arc<dyn CenterDirectory>,
}

impl SessionUseCase {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        telemetry: Arc<dyn TelemetrySource>,
        booking: Arc<dyn BookingService>,
        centers: Arc<dyn CenterDirectory>,
    ) -> Self {
        Self {
            auth,
            telemetry,
            booking,
            centers,
        }
    }

    /// Service centers available for booking, for selection UIs.
    pub fn centers(&self) -> &[ServiceCenter] {
        self.centers.all()
    }

    /// Authenticates and builds the role-appropriate session.
    ///
    /// For owners with a non-empty garage the first vehicle is selected
    /// immediately. A failed initial connect is logged and tolerated: the
    /// controller comes back in `Disconnected` state and the user can
    /// retry from the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `Auth` on rejected credentials and `Transport` when the
    /// login backend is unreachable.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        role: SessionRole,
    ) -> Result<ActiveSession> {
        let session = self.auth.login(username, password, role).await?;
        tracing::info!(
            "login succeeded for {} ({:?})",
            session.identity().username,
            session.role()
        );

        if session.role() == SessionRole::Dealer {
            return Ok(ActiveSession::Dealer(session));
        }

        let first_vehicle = session.vehicles().first().map(|v| v.vin.clone());
        let mut controller = DashboardSessionController::new(
            session,
            self.telemetry.clone(),
            self.booking.clone(),
            self.centers.clone(),
        );
        if let Some(vin) = first_vehicle {
            if let Err(e) = controller.select_vehicle(&vin).await {
                tracing::warn!("initial telemetry connect for {vin} failed: {e}");
            }
        }
        Ok(ActiveSession::Owner(controller))
    }

    /// Confirmed bookings for a service center, newest last.
    ///
    /// # Errors
    ///
    /// Rejects an unknown `center_id` before any network call.
    pub async fn bookings_for_center(&self, center_id: &str) -> Result<Vec<Ticket>> {
        if self.centers.find(center_id).is_none() {
            return Err(FleetError::config(format!(
                "unknown service center '{center_id}'"
            )));
        }
        self.booking.bookings_for_center(center_id).await
    }
}
