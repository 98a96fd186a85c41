//! Dashboard session controller.
//!
//! Top-level orchestrator for an owner session: owns the selected vehicle,
//! wires telemetry channel output into the risk classifier, and exposes the
//! alert/ticket projection the view layer renders. Telemetry is processed
//! one event at a time, in arrival order, from a single consumer task.

use crate::booking::{BookingCoordinator, BookingStart, PendingBooking};
use crate::channel::{ChannelEvent, TelemetryChannel};
use autodoc_core::booking::{BookingError, BookingService, Ticket};
use autodoc_core::center::CenterDirectory;
use autodoc_core::classifier::classify;
use autodoc_core::session::{Alert, Session};
use autodoc_core::telemetry::TelemetrySource;
use autodoc_core::vehicle::VehicleId;
use autodoc_core::{FleetError, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

const EVENT_QUEUE_DEPTH: usize = 32;

/// Channel lifecycle state, per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    NoVehicleSelected,
    Connecting,
    Monitoring,
    Disconnected,
}

pub struct DashboardSessionController {
    session: Session,
    channel: TelemetryChannel,
    events: mpsc::Receiver<ChannelEvent>,
    booking: BookingCoordinator,
    state: ChannelState,
    /// Last dropped-sample or disconnect diagnostic, for the view layer.
    last_error: Option<FleetError>,
}

impl DashboardSessionController {
    pub fn new(
        session: Session,
        source: Arc<dyn TelemetrySource>,
        booking_service: Arc<dyn BookingService>,
        directory: Arc<dyn CenterDirectory>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        Self {
            session,
            channel: TelemetryChannel::new(source, events_tx),
            events: events_rx,
            booking: BookingCoordinator::new(booking_service, directory),
            state: ChannelState::NoVehicleSelected,
            last_error: None,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selected_vehicle(&self) -> Option<&VehicleId> {
        self.session.selected()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.session.alert()
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.session.ticket()
    }

    pub fn last_error(&self) -> Option<&FleetError> {
        self.last_error.as_ref()
    }

    /// Selects a vehicle and (re)binds the telemetry channel to it.
    ///
    /// Re-selecting the vehicle that is already streaming is a no-op.
    /// Otherwise the prior channel is closed first, the projection and
    /// booking state reset, and a fresh subscription opened.
    ///
    /// # Errors
    ///
    /// `UnknownVehicle` for a VIN outside the garage; `ChannelDisconnected`
    /// when the subscription cannot be opened (state becomes
    /// `Disconnected`, recoverable via [`Self::retry`]).
    pub async fn select_vehicle(&mut self, vin: &VehicleId) -> Result<()> {
        let already_streaming = self.session.selected() == Some(vin)
            && matches!(self.state, ChannelState::Connecting | ChannelState::Monitoring);
        if already_streaming {
            return Ok(());
        }
        self.session.select(vin)?;
        self.booking.reset();
        self.channel.close();
        self.connect().await
    }

    /// Explicit user-initiated reconnect after a disconnect.
    pub async fn retry(&mut self) -> Result<()> {
        if self.session.selected().is_none() {
            return Err(FleetError::NoVehicleSelected);
        }
        self.channel.close();
        self.connect().await
    }

    async fn connect(&mut self) -> Result<()> {
        let vin = self
            .session
            .selected()
            .cloned()
            .ok_or(FleetError::NoVehicleSelected)?;
        self.state = ChannelState::Connecting;
        self.last_error = None;
        match self.channel.open(&vin, self.session.role()).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.state = ChannelState::Disconnected;
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Awaits the next channel event and applies it.
    ///
    /// Returns `Ok(true)` when the event belonged to the live subscription
    /// and was applied, `Ok(false)` when a stale event was discarded.
    pub async fn process_next_event(&mut self) -> Result<bool> {
        let event = self
            .events
            .recv()
            .await
            .ok_or_else(|| FleetError::internal("telemetry event queue closed"))?;
        Ok(self.apply_event(event))
    }

    fn apply_event(&mut self, event: ChannelEvent) -> bool {
        if !self.channel.accepts(event.generation()) {
            tracing::debug!("dropping telemetry event from superseded subscription");
            return false;
        }
        match event {
            ChannelEvent::Sample { sample, .. } => {
                if self.session.selected() != Some(&sample.vehicle_id) {
                    tracing::warn!(
                        "dropping sample for {} on channel bound to {:?}",
                        sample.vehicle_id,
                        self.session.selected()
                    );
                    return false;
                }
                if self.state == ChannelState::Connecting {
                    self.state = ChannelState::Monitoring;
                }
                let decision = classify(&sample);
                self.session.apply_sample(&sample, decision);
            }
            ChannelEvent::Invalid { error, .. } => {
                // sample dropped, prior alert state retained
                tracing::warn!("malformed telemetry sample dropped: {error}");
                self.last_error = Some(error);
            }
            ChannelEvent::Disconnected { .. } => {
                self.channel.close();
                self.state = ChannelState::Disconnected;
                self.last_error = Some(FleetError::ChannelDisconnected);
            }
        }
        true
    }

    /// Validates a booking attempt against the current alert occurrence.
    pub fn begin_booking(&mut self, center_id: &str) -> std::result::Result<BookingStart, BookingError> {
        let vin = self
            .session
            .selected()
            .cloned()
            .ok_or(BookingError::NoActiveAlert)?;
        let failure_type = self
            .session
            .alert()
            .map(|a| a.failure_type.clone())
            .ok_or(BookingError::NoActiveAlert)?;
        self.booking.prepare(&self.session, &vin, &failure_type, center_id)
    }

    /// Performs the remote booking call for a prepared attempt. Does not
    /// borrow the projection, so telemetry processing continues meanwhile.
    pub async fn dispatch_booking(
        &self,
        pending: &PendingBooking,
    ) -> std::result::Result<Ticket, BookingError> {
        self.booking.dispatch(pending).await
    }

    /// Applies a booking outcome; discards it if the alert occurrence was
    /// superseded while the call was in flight.
    pub fn resolve_booking(
        &mut self,
        pending: &PendingBooking,
        outcome: std::result::Result<Ticket, BookingError>,
    ) -> std::result::Result<Ticket, BookingError> {
        self.booking.complete(&mut self.session, pending, outcome)
    }

    /// Books a repair for the current actionable alert in one go.
    ///
    /// Idempotent per alert occurrence: once a ticket exists, repeat calls
    /// return it without a network request.
    pub async fn book(&mut self, center_id: &str) -> std::result::Result<Ticket, BookingError> {
        match self.begin_booking(center_id)? {
            BookingStart::AlreadyBooked(ticket) => Ok(ticket),
            BookingStart::Dispatch(pending) => {
                let outcome = self.booking.dispatch(&pending).await;
                self.resolve_booking(&pending, outcome)
            }
        }
    }

    /// Tears the session down: closes the channel and clears the
    /// projection. The only teardown path while the session is alive.
    pub fn logout(mut self) {
        tracing::info!("session logout for {}", self.session.identity().username);
        self.channel.close();
        self.session.clear_projection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use autodoc_core::booking::BookingRequest;
    use autodoc_core::classifier::AlertDecision;
    use autodoc_core::center::ServiceCenter;
    use autodoc_core::session::{SessionIdentity, SessionRole};
    use autodoc_core::telemetry::{TelemetrySample, TelemetryStream};
    use autodoc_core::vehicle::Vehicle;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct MockSource {
        feeds: Mutex<HashMap<String, mpsc::UnboundedReceiver<Result<TelemetrySample>>>>,
    }

    impl MockSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                feeds: Mutex::new(HashMap::new()),
            })
        }

        fn feed(&self, vin: &str) -> mpsc::UnboundedSender<Result<TelemetrySample>> {
            let (tx, rx) = mpsc::unbounded_channel();
            self.feeds.lock().unwrap().insert(vin.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl TelemetrySource for MockSource {
        async fn subscribe(
            &self,
            vehicle_id: &VehicleId,
            _role: SessionRole,
        ) -> Result<TelemetryStream> {
            let rx = self
                .feeds
                .lock()
                .unwrap()
                .remove(vehicle_id.as_str())
                .ok_or(FleetError::ChannelDisconnected)?;
            Ok(Box::pin(futures_util::stream::unfold(rx, |mut rx| async {
                rx.recv().await.map(|item| (item, rx))
            })))
        }
    }

    struct MockBookingService {
        calls: AtomicUsize,
        next_ticket: Mutex<String>,
    }

    impl MockBookingService {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                next_ticket: Mutex::new("SRV-10001".to_string()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_next_ticket(&self, id: &str) {
            *self.next_ticket.lock().unwrap() = id.to_string();
        }
    }

    #[async_trait]
    impl BookingService for MockBookingService {
        async fn submit(
            &self,
            request: &BookingRequest,
        ) -> std::result::Result<Ticket, BookingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Ticket {
                ticket_id: self.next_ticket.lock().unwrap().clone(),
                vehicle_id: request.vehicle_id.clone(),
                failure_type: request.issue.clone(),
                center_id: request.center_id.clone(),
                created_at: chrono::Utc::now(),
            })
        }

        async fn bookings_for_center(&self, _center_id: &str) -> Result<Vec<Ticket>> {
            Ok(Vec::new())
        }
    }

    struct MockDirectory {
        centers: Vec<ServiceCenter>,
    }

    impl MockDirectory {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                centers: vec![ServiceCenter {
                    id: "SC_MUMBAI".into(),
                    name: "Mumbai Central Service".into(),
                    lat: 19.076,
                    lon: 72.8777,
                    manager: "mumbai.manager@svc.local".into(),
                }],
            })
        }
    }

    impl CenterDirectory for MockDirectory {
        fn all(&self) -> &[ServiceCenter] {
            &self.centers
        }
    }

    fn owner_session() -> Session {
        Session::new_owner(
            SessionIdentity {
                username: "asha".into(),
                full_name: "Asha Rao".into(),
            },
            vec![
                Vehicle {
                    vin: VehicleId::new("V1"),
                    model: "XUV 7XO".into(),
                    dealer_id: Some("DLR-MAH".into()),
                },
                Vehicle {
                    vin: VehicleId::new("V2"),
                    model: "Mavrick 440".into(),
                    dealer_id: None,
                },
            ],
        )
    }

    fn sample(vin: &str, failure: Option<&str>, risk_score: f64) -> TelemetrySample {
        TelemetrySample {
            vehicle_id: VehicleId::new(vin),
            risk_score,
            failure: failure.map(str::to_string),
            root_cause_sensor: Some("temperature".into()),
            temperature: Some(96.0),
            vibration: None,
            rpm: None,
            timestamp: None,
        }
    }

    struct Fixture {
        controller: DashboardSessionController,
        source: Arc<MockSource>,
        booking: Arc<MockBookingService>,
    }

    fn fixture() -> Fixture {
        let source = MockSource::new();
        let booking = MockBookingService::new();
        let controller = DashboardSessionController::new(
            owner_session(),
            source.clone(),
            booking.clone(),
            MockDirectory::new(),
        );
        Fixture {
            controller,
            source,
            booking,
        }
    }

    /// Lets spawned forwarder tasks drain their streams into the queue.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn first_sample_moves_connecting_to_monitoring() {
        let mut f = fixture();
        let feed = f.source.feed("V1");

        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        assert_eq!(f.controller.state(), ChannelState::Connecting);

        feed.send(Ok(sample("V1", None, 0.1))).unwrap();
        assert!(f.controller.process_next_event().await.unwrap());
        assert_eq!(f.controller.state(), ChannelState::Monitoring);
        assert!(f.controller.alert().is_none());
    }

    #[tokio::test]
    async fn actionable_sample_projects_alert() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();

        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();

        let alert = f.controller.alert().expect("alert expected");
        assert_eq!(alert.failure_type, "Overheat");
        assert_eq!(alert.vehicle_id.as_str(), "V1");
        assert_eq!(f.controller.session().last_decision(), AlertDecision::Actionable);
    }

    #[tokio::test]
    async fn switching_vehicles_discards_stale_samples() {
        let mut f = fixture();
        let feed_a = f.source.feed("V1");
        let _feed_b = f.source.feed("V2");

        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        // land a V1 sample in the queue, then switch before processing it
        feed_a.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        settle().await;
        f.controller.select_vehicle(&VehicleId::new("V2")).await.unwrap();

        assert_eq!(f.controller.selected_vehicle(), Some(&VehicleId::new("V2")));
        assert!(!f.controller.process_next_event().await.unwrap(), "stale V1 event");
        assert!(f.controller.alert().is_none(), "V1 sample must never be classified");
        assert_eq!(f.controller.state(), ChannelState::Connecting);
    }

    #[tokio::test]
    async fn reselecting_streaming_vehicle_is_a_noop() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();

        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();

        // a real re-open would fail: the mock feed for V1 is consumed
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        assert_eq!(f.controller.state(), ChannelState::Monitoring);
        assert!(f.controller.alert().is_some(), "projection survives the no-op");

        // channel still live on the original subscription
        feed.send(Ok(sample("V1", None, 0.1))).unwrap();
        assert!(f.controller.process_next_event().await.unwrap());
    }

    #[tokio::test]
    async fn selecting_unowned_vehicle_fails() {
        let mut f = fixture();
        let err = f
            .controller
            .select_vehicle(&VehicleId::new("NOT-MINE"))
            .await
            .unwrap_err();
        assert!(matches!(err, FleetError::UnknownVehicle { .. }));
        assert_eq!(f.controller.state(), ChannelState::NoVehicleSelected);
    }

    #[tokio::test]
    async fn double_book_issues_one_network_call() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();

        let first = f.controller.book("SC_MUMBAI").await.unwrap();
        let second = f.controller.book("SC_MUMBAI").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(f.booking.calls(), 1);
        assert_eq!(f.controller.ticket(), Some(&first));
    }

    #[tokio::test]
    async fn new_occurrence_allows_rebooking() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();

        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();
        let first = f.controller.book("SC_MUMBAI").await.unwrap();

        // clear, then reappear: a fresh occurrence
        feed.send(Ok(sample("V1", None, 0.1))).unwrap();
        f.controller.process_next_event().await.unwrap();
        feed.send(Ok(sample("V1", Some("Overheat"), 0.95))).unwrap();
        f.controller.process_next_event().await.unwrap();

        f.booking.set_next_ticket("SRV-10002");
        let second = f.controller.book("SC_MUMBAI").await.unwrap();
        assert_ne!(first.ticket_id, second.ticket_id);
        assert_eq!(f.booking.calls(), 2);
        assert_eq!(f.controller.session().ticket_history().len(), 2);
    }

    #[tokio::test]
    async fn pending_booking_is_discarded_when_alert_clears() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();

        let pending = match f.controller.begin_booking("SC_MUMBAI").unwrap() {
            BookingStart::Dispatch(pending) => pending,
            BookingStart::AlreadyBooked(t) => panic!("unexpected ticket {t:?}"),
        };

        // alert clears while the call is in flight
        feed.send(Ok(sample("V1", None, 0.1))).unwrap();
        f.controller.process_next_event().await.unwrap();

        let outcome = f.controller.dispatch_booking(&pending).await;
        let err = f.controller.resolve_booking(&pending, outcome).unwrap_err();
        assert_eq!(err, BookingError::NoActiveAlert);
        assert!(f.controller.ticket().is_none());
        assert!(f.controller.session().ticket_history().is_empty());
    }

    #[tokio::test]
    async fn invalid_center_is_rejected_without_network_call() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();

        let err = f.controller.book("SC_BAD").await.unwrap_err();
        assert_eq!(
            err,
            BookingError::InvalidCenter {
                center_id: "SC_BAD".into()
            }
        );
        assert_eq!(f.booking.calls(), 0);
        assert!(f.controller.alert().is_some(), "alert state unchanged");
    }

    #[tokio::test]
    async fn booking_without_actionable_alert_fails() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();

        // advisory only: flagged but at the threshold
        feed.send(Ok(sample("V1", Some("Overheat"), 0.5))).unwrap();
        f.controller.process_next_event().await.unwrap();

        let err = f.controller.book("SC_MUMBAI").await.unwrap_err();
        assert_eq!(err, BookingError::NoActiveAlert);
        assert_eq!(f.booking.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_sample_retains_prior_alert() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();

        feed.send(Err(FleetError::classification_invalid("missing risk_score_numeric")))
            .unwrap();
        f.controller.process_next_event().await.unwrap();

        assert!(f.controller.alert().is_some());
        assert_eq!(f.controller.state(), ChannelState::Monitoring);
        assert!(
            f.controller
                .last_error()
                .is_some_and(|e| e.is_classification_invalid())
        );
    }

    #[tokio::test]
    async fn disconnect_requires_explicit_retry() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();
        feed.send(Ok(sample("V1", None, 0.1))).unwrap();
        f.controller.process_next_event().await.unwrap();

        drop(feed);
        f.controller.process_next_event().await.unwrap();
        assert_eq!(f.controller.state(), ChannelState::Disconnected);
        assert!(f.controller.last_error().is_some_and(|e| e.is_disconnected()));

        // no auto-reconnect: a fresh feed only helps once retry() is called
        let feed = f.source.feed("V1");
        f.controller.retry().await.unwrap();
        assert_eq!(f.controller.state(), ChannelState::Connecting);
        feed.send(Ok(sample("V1", None, 0.2))).unwrap();
        f.controller.process_next_event().await.unwrap();
        assert_eq!(f.controller.state(), ChannelState::Monitoring);
    }

    #[tokio::test]
    async fn end_to_end_overheat_scenario() {
        let mut f = fixture();
        let feed = f.source.feed("V1");
        f.controller.select_vehicle(&VehicleId::new("V1")).await.unwrap();

        // sample 1: actionable alert appears
        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();
        assert_eq!(f.controller.alert().map(|a| a.failure_type.as_str()), Some("Overheat"));

        // booking succeeds
        let ticket = f.controller.book("SC_MUMBAI").await.unwrap();
        assert_eq!(f.controller.ticket(), Some(&ticket));

        // sample 2: same occurrence, ticket stays
        feed.send(Ok(sample("V1", Some("Overheat"), 0.9))).unwrap();
        f.controller.process_next_event().await.unwrap();
        assert_eq!(f.controller.ticket(), Some(&ticket));

        // sample 3: alert clears, ticket projection reverts, history keeps T1
        feed.send(Ok(sample("V1", None, 0.2))).unwrap();
        f.controller.process_next_event().await.unwrap();
        assert!(f.controller.alert().is_none());
        assert!(f.controller.ticket().is_none());
        assert_eq!(f.controller.session().ticket_history(), &[ticket]);
    }
}
