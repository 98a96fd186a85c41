//! Per-vehicle telemetry channel.
//!
//! Owns at most one live subscription at a time; its lifecycle follows the
//! session's vehicle selection. A spawned forwarding task moves samples from
//! the source stream into the controller's event queue, tagged with a
//! subscription generation so events from a superseded subscription can be
//! recognized and dropped after a switch.

use autodoc_core::session::SessionRole;
use autodoc_core::telemetry::{TelemetrySample, TelemetrySource, TelemetryStream};
use autodoc_core::vehicle::VehicleId;
use autodoc_core::{FleetError, Result};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Events the channel publishes to its owner.
#[derive(Debug)]
pub enum ChannelEvent {
    /// A validated sample, in per-vehicle emission order.
    Sample {
        generation: u64,
        sample: TelemetrySample,
    },
    /// A malformed frame was dropped; diagnostics only.
    Invalid { generation: u64, error: FleetError },
    /// The transport is gone. Terminal for this subscription.
    Disconnected { generation: u64 },
}

impl ChannelEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Sample { generation, .. }
            | Self::Invalid { generation, .. }
            | Self::Disconnected { generation } => *generation,
        }
    }
}

struct Subscription {
    vehicle_id: VehicleId,
    generation: u64,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// One live subscription to a single vehicle's telemetry stream.
pub struct TelemetryChannel {
    source: Arc<dyn TelemetrySource>,
    events: mpsc::Sender<ChannelEvent>,
    active: Option<Subscription>,
    generation: u64,
}

impl TelemetryChannel {
    pub fn new(source: Arc<dyn TelemetrySource>, events: mpsc::Sender<ChannelEvent>) -> Self {
        Self {
            source,
            events,
            active: None,
            generation: 0,
        }
    }

    /// Vehicle the channel is currently bound to.
    pub fn vehicle(&self) -> Option<&VehicleId> {
        self.active.as_ref().map(|s| &s.vehicle_id)
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Whether an event with this generation belongs to the live
    /// subscription. Stale events from a closed subscription fail this.
    pub fn accepts(&self, generation: u64) -> bool {
        self.active.as_ref().is_some_and(|s| s.generation == generation)
    }

    /// Opens a subscription for `vehicle_id`.
    ///
    /// Idempotent for the vehicle that is already open. For a different
    /// vehicle the old subscription is closed first; two never coexist.
    ///
    /// # Errors
    ///
    /// Returns `ChannelDisconnected` when the source cannot establish the
    /// stream; the channel stays closed.
    pub async fn open(&mut self, vehicle_id: &VehicleId, role: SessionRole) -> Result<()> {
        if let Some(active) = &self.active {
            if &active.vehicle_id == vehicle_id {
                return Ok(());
            }
        }
        self.close();

        self.generation += 1;
        let generation = self.generation;
        let stream = self.source.subscribe(vehicle_id, role).await?;
        tracing::debug!("telemetry channel open for {vehicle_id} (generation {generation})");

        let cancel = CancellationToken::new();
        let task = tokio::spawn(forward(stream, self.events.clone(), generation, cancel.clone()));
        self.active = Some(Subscription {
            vehicle_id: vehicle_id.clone(),
            generation,
            cancel,
            task,
        });
        Ok(())
    }

    /// Closes the live subscription, if any. Safe to call repeatedly and on
    /// a never-opened channel.
    pub fn close(&mut self) {
        if let Some(subscription) = self.active.take() {
            tracing::debug!("closing telemetry channel for {}", subscription.vehicle_id);
            subscription.cancel.cancel();
            subscription.task.abort();
        }
    }
}

impl Drop for TelemetryChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Moves stream items into the event queue until cancelled, the stream
/// ends, or the receiving side is gone. Samples are forwarded one at a
/// time, never buffered past the queue.
async fn forward(
    mut stream: TelemetryStream,
    events: mpsc::Sender<ChannelEvent>,
    generation: u64,
    cancel: CancellationToken,
) {
    loop {
        let item = tokio::select! {
            _ = cancel.cancelled() => break,
            item = stream.next() => item,
        };
        let event = match item {
            Some(Ok(sample)) => ChannelEvent::Sample { generation, sample },
            Some(Err(error)) if error.is_classification_invalid() => {
                ChannelEvent::Invalid { generation, error }
            }
            Some(Err(_)) | None => {
                let _ = events.send(ChannelEvent::Disconnected { generation }).await;
                break;
            }
        };
        if events.send(event).await.is_err() {
            break;
        }
    }
}
