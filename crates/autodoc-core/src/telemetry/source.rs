//! Telemetry source trait.
//!
//! Defines the interface for the per-vehicle push stream, decoupling the
//! pipeline from the transport (WebSocket in production, in-memory channels
//! in tests).

use crate::Result;
use crate::session::SessionRole;
use crate::telemetry::TelemetrySample;
use crate::vehicle::VehicleId;
use async_trait::async_trait;
use futures_util::stream::Stream;
use std::pin::Pin;

/// A live stream of validated samples for one vehicle.
///
/// `Ok` items are validated samples in emission order. An
/// `Err(ClassificationInvalid)` item is a malformed frame and is not
/// terminal; the stream continues past it. `Err(ChannelDisconnected)` and
/// the end of the stream both mean the transport is gone for good.
pub type TelemetryStream = Pin<Box<dyn Stream<Item = Result<TelemetrySample>> + Send>>;

/// An abstract per-vehicle telemetry feed.
///
/// Implementations must not reconnect on their own; once a stream ends the
/// subscription is gone and the owner decides whether to subscribe again.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Opens a subscription for one vehicle.
    ///
    /// # Arguments
    ///
    /// * `vehicle_id` - VIN of the vehicle to stream
    /// * `role` - role marker forwarded to the backend
    ///
    /// # Errors
    ///
    /// Returns `ChannelDisconnected` (or `Transport`) when the subscription
    /// cannot be established.
    async fn subscribe(&self, vehicle_id: &VehicleId, role: SessionRole)
    -> Result<TelemetryStream>;
}
