//! Validated telemetry sample.

use crate::error::FleetError;
use crate::vehicle::VehicleId;
use autodoc_types::TelemetryFrame;
use serde::{Deserialize, Serialize};

/// Sentinel the predictive model uses for "no predicted failure".
const NO_FAILURE_SENTINEL: &str = "None";

/// One validated point-in-time reading for a vehicle.
///
/// Produced from a [`TelemetryFrame`] via `TryFrom`; frames that fail
/// validation are dropped by the pipeline with a
/// [`FleetError::ClassificationInvalid`] diagnostic and never reach the
/// classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub vehicle_id: VehicleId,
    /// Risk score from the predictive model, guaranteed finite and in `[0, 1]`.
    pub risk_score: f64,
    /// Predicted failure label; `None` when the model flagged no issue.
    pub failure: Option<String>,
    /// Sensor the model blames for the predicted failure.
    pub root_cause_sensor: Option<String>,
    pub temperature: Option<f64>,
    pub vibration: Option<f64>,
    pub rpm: Option<i64>,
    /// Emission timestamp as formatted by the backend (display only).
    pub timestamp: Option<String>,
}

impl TryFrom<TelemetryFrame> for TelemetrySample {
    type Error = FleetError;

    fn try_from(frame: TelemetryFrame) -> Result<Self, Self::Error> {
        let vehicle_id = match frame.vehicle_id {
            Some(vin) if !vin.is_empty() => VehicleId::new(vin),
            _ => return Err(FleetError::classification_invalid("missing vehicle_id")),
        };

        let risk_score = frame
            .risk_score_numeric
            .ok_or_else(|| FleetError::classification_invalid("missing risk_score_numeric"))?;
        if !risk_score.is_finite() || !(0.0..=1.0).contains(&risk_score) {
            return Err(FleetError::classification_invalid(format!(
                "risk_score_numeric {risk_score} outside [0, 1]"
            )));
        }

        let failure = match frame.predicted_failure_type {
            Some(label) if label == NO_FAILURE_SENTINEL => None,
            Some(label) if !label.is_empty() => Some(label),
            _ => {
                return Err(FleetError::classification_invalid(
                    "missing predicted_failure_type",
                ));
            }
        };

        Ok(Self {
            vehicle_id,
            risk_score,
            failure,
            root_cause_sensor: frame.root_cause_sensor,
            temperature: frame.temperature,
            vibration: frame.vibration,
            rpm: frame.rpm,
            timestamp: frame.timestamp,
        })
    }
}
