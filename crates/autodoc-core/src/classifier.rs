//! Risk classifier.
//!
//! Pure, stateless mapping from a telemetry sample to an alert decision.
//! The anomaly model itself is external; this only applies the booking
//! eligibility threshold to its output.

use crate::telemetry::TelemetrySample;
use serde::{Deserialize, Serialize};

/// Risk score above which a flagged failure becomes booking-eligible.
/// Exclusive: a score of exactly 0.5 stays advisory.
pub const ACTIONABLE_RISK_THRESHOLD: f64 = 0.5;

/// Outcome of classifying one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDecision {
    /// No predicted failure.
    #[default]
    None,
    /// Failure flagged but below the booking threshold.
    Advisory,
    /// Failure flagged and booking-eligible.
    Actionable,
}

/// Classifies a sample against the actionable threshold.
///
/// Deterministic and side-effect-free. A sample with no flagged failure is
/// `None` regardless of score. A flagged failure is `Actionable` when the
/// score is strictly above 0.5 and `Advisory` otherwise.
pub fn classify(sample: &TelemetrySample) -> AlertDecision {
    if sample.failure.is_none() {
        return AlertDecision::None;
    }
    if sample.risk_score > ACTIONABLE_RISK_THRESHOLD {
        AlertDecision::Actionable
    } else {
        AlertDecision::Advisory
    }
}
