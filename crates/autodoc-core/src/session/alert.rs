//! Derived alert projection.

use crate::telemetry::TelemetrySample;
use crate::vehicle::VehicleId;
use serde::{Deserialize, Serialize};

/// A booking-eligible issue derived from the latest telemetry sample.
///
/// Transient by design: an alert is never stored independently and
/// disappears the instant a new sample no longer satisfies the actionable
/// predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub vehicle_id: VehicleId,
    pub failure_type: String,
    pub root_cause_sensor: Option<String>,
    pub risk_score: f64,
}

impl Alert {
    /// Builds the alert for an actionable sample. Returns `None` when the
    /// sample carries no flagged failure.
    pub fn from_sample(sample: &TelemetrySample) -> Option<Self> {
        let failure_type = sample.failure.clone()?;
        Some(Self {
            vehicle_id: sample.vehicle_id.clone(),
            failure_type,
            root_cause_sensor: sample.root_cause_sensor.clone(),
            risk_score: sample.risk_score,
        })
    }
}
