//! HTTP booking client.
//!
//! Talks to the backend's `/book-service` and `/manager/bookings`
//! endpoints. The coordinator in `autodoc-application` is responsible for
//! idempotence; this client issues exactly one request per call.

use crate::config::ClientConfig;
use async_trait::async_trait;
use autodoc_core::booking::{BookingError, BookingRequest, BookingService, Ticket};
use autodoc_core::vehicle::VehicleId;
use autodoc_core::{FleetError, Result};
use autodoc_types::{BookingConfirmation, BookingListResponse, BookingRequestDto};
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use std::time::Duration;

pub struct HttpBookingClient {
    client: Client,
    api_base: String,
}

impl HttpBookingClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FleetError::internal(format!("http client: {e}")))?;
        Ok(Self {
            client,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BookingService for HttpBookingClient {
    async fn submit(&self, request: &BookingRequest) -> std::result::Result<Ticket, BookingError> {
        let body = BookingRequestDto {
            chassis_number: request.vehicle_id.to_string(),
            owner_name: request.owner_name.clone(),
            issue: request.issue.clone(),
            dealer_name: request.dealer_name.clone(),
            center_id: request.center_id.clone(),
        };
        let response = self
            .client
            .post(format!("{}/book-service", self.api_base))
            .json(&body)
            .send()
            .await
            .map_err(|e| BookingError::ServerRejected {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            tracing::warn!("booking rejected ({status}): {reason}");
            return Err(BookingError::ServerRejected {
                reason: format!("{status}: {reason}"),
            });
        }

        let confirmation: BookingConfirmation =
            response.json().await.map_err(|e| BookingError::ServerRejected {
                reason: format!("undecodable confirmation: {e}"),
            })?;
        tracing::info!(
            "booked ticket {} for {} at {}",
            confirmation.ticket_id,
            confirmation.vehicle_id,
            confirmation.center_id
        );
        Ok(ticket_from_confirmation(confirmation))
    }

    async fn bookings_for_center(&self, center_id: &str) -> Result<Vec<Ticket>> {
        let response = self
            .client
            .get(format!("{}/manager/bookings", self.api_base))
            .query(&[("center_id", center_id)])
            .send()
            .await
            .map_err(|e| FleetError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FleetError::transport(format!(
                "booking list failed: {status}"
            )));
        }
        let list: BookingListResponse = response
            .json()
            .await
            .map_err(|e| FleetError::transport(format!("undecodable booking list: {e}")))?;
        Ok(list.bookings.into_iter().map(ticket_from_confirmation).collect())
    }
}

fn ticket_from_confirmation(confirmation: BookingConfirmation) -> Ticket {
    Ticket {
        ticket_id: confirmation.ticket_id,
        vehicle_id: VehicleId::new(confirmation.vehicle_id),
        failure_type: confirmation.issue,
        center_id: confirmation.center_id,
        created_at: confirmation
            .created_at
            .as_deref()
            .and_then(parse_backend_timestamp)
            .unwrap_or_else(Utc::now),
    }
}

/// The backend emits `datetime.utcnow().isoformat()`, which has no offset;
/// accept both that and proper RFC 3339.
fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}
