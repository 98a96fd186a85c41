//! Telemetry domain module.
//!
//! - `sample`: validated domain sample and its wire-frame conversion
//! - `source`: the push-stream collaborator trait implemented by the
//!   WebSocket adapter

mod sample;
mod source;

pub use sample::TelemetrySample;
pub use source::{TelemetrySource, TelemetryStream};
