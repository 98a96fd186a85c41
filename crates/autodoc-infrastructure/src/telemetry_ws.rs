//! WebSocket telemetry source.
//!
//! Connects to the backend's per-vehicle push stream at
//! `{ws_base}/ws/{client_id}?vehicle_id={vin}&role={role}` and yields
//! validated samples. The adapter never reconnects; transport loss ends the
//! stream with a terminal `ChannelDisconnected` item and the session
//! controller decides what happens next.

use crate::config::ClientConfig;
use async_trait::async_trait;
use autodoc_core::session::SessionRole;
use autodoc_core::telemetry::{TelemetrySample, TelemetrySource, TelemetryStream};
use autodoc_core::vehicle::VehicleId;
use autodoc_core::{FleetError, Result};
use autodoc_types::TelemetryFrame;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

pub struct WsTelemetrySource {
    ws_base: String,
    // Backend routes are /ws/{client_id} with a numeric id; one counter per
    // source keeps concurrent subscriptions distinguishable in server logs.
    next_client_id: AtomicU32,
}

impl WsTelemetrySource {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            ws_base: config.ws_base_url.trim_end_matches('/').to_string(),
            next_client_id: AtomicU32::new(1),
        }
    }

    fn subscription_url(&self, vehicle_id: &VehicleId, role: SessionRole) -> String {
        let client_id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}/ws/{}?vehicle_id={}&role={}",
            self.ws_base,
            client_id,
            vehicle_id,
            role.wire_name()
        )
    }
}

#[async_trait]
impl TelemetrySource for WsTelemetrySource {
    async fn subscribe(
        &self,
        vehicle_id: &VehicleId,
        role: SessionRole,
    ) -> Result<TelemetryStream> {
        let url = self.subscription_url(vehicle_id, role);
        tracing::debug!("opening telemetry subscription: {url}");
        let (socket, _) = connect_async(&url).await.map_err(|e| {
            tracing::warn!("telemetry connect failed for {vehicle_id}: {e}");
            FleetError::ChannelDisconnected
        })?;
        let (_, read) = socket.split();

        let stream = read.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(parse_frame(&text)),
                Ok(Message::Close(_)) => Some(Err(FleetError::ChannelDisconnected)),
                // ping/pong/binary frames carry no telemetry
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("telemetry transport error: {e}");
                    Some(Err(FleetError::ChannelDisconnected))
                }
            }
        });
        Ok(Box::pin(stream))
    }
}

/// Decodes one text frame into a validated sample.
///
/// Undecodable JSON and frames failing field validation both surface as
/// `ClassificationInvalid`: the frame is dropped, the stream continues.
fn parse_frame(text: &str) -> Result<TelemetrySample> {
    let frame: TelemetryFrame = serde_json::from_str(text)
        .map_err(|e| FleetError::classification_invalid(format!("undecodable frame: {e}")))?;
    TelemetrySample::try_from(frame)
}
