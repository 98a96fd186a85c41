//! Telemetry wire format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One telemetry frame as pushed by the backend over the per-vehicle
/// WebSocket.
///
/// The backend emits a wide, flat JSON object: a handful of headline
/// readings, the predictive-model outputs, and several dozen vehicle-type
/// specific sensors. Only the fields the client acts on are modeled
/// explicitly; everything else lands in `extra` so the view layer can still
/// render it.
///
/// The model outputs use `"None"` as a sentinel for "no predicted failure";
/// mapping that sentinel into an `Option` happens during domain conversion,
/// not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryFrame {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub vibration: Option<f64>,
    #[serde(default)]
    pub rpm: Option<i64>,
    /// Numeric risk score in `[0, 1]` from the predictive model.
    ///
    /// The backend also emits an enum-valued `risk_score` field produced by
    /// the agent workflow; the client ignores it and keys off the numeric
    /// score only.
    #[serde(default)]
    pub risk_score_numeric: Option<f64>,
    /// Predicted failure label, `"None"` when the model sees no issue.
    #[serde(default)]
    pub predicted_failure_type: Option<String>,
    /// Sensor the model blames for the predicted failure.
    #[serde(default)]
    pub root_cause_sensor: Option<String>,
    /// Remaining sensor readings (oil quality, battery SoH, brake wear, the
    /// per-vehicle-type blocks, ...), kept as-is for display.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
