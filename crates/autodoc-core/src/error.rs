//! Error types for the AutoDoc client.

use crate::booking::BookingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the AutoDoc client core.
///
/// Typed, structured variants with automatic conversion from common error
/// types via `From`. Policy: none of these crash the session. A bad sample
/// or a failed booking call is reported to the caller and the last known
/// good alert/ticket projection is preserved.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FleetError {
    /// The telemetry transport dropped. Terminal for the channel; recovery
    /// requires an explicit retry or re-selection.
    #[error("telemetry channel disconnected")]
    ChannelDisconnected,

    /// A telemetry sample was malformed (missing required fields or an
    /// out-of-range risk score). The sample is dropped and prior alert
    /// state is retained; surfaced for diagnostics only.
    #[error("invalid telemetry sample: {reason}")]
    ClassificationInvalid { reason: String },

    /// Booking-time failure, reported to the caller verbatim.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// A vehicle identifier not owned by the current session.
    #[error("vehicle '{vin}' is not in this session's garage")]
    UnknownVehicle { vin: String },

    /// An operation that needs a selected vehicle was called without one.
    #[error("no vehicle selected")]
    NoVehicleSelected,

    /// Network/transport error outside the telemetry channel.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// IO error (config file access)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Login/authentication error
    #[error("authentication error: {0}")]
    Auth(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl FleetError {
    /// Creates a ClassificationInvalid error
    pub fn classification_invalid(reason: impl Into<String>) -> Self {
        Self::ClassificationInvalid {
            reason: reason.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a channel disconnect
    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::ChannelDisconnected)
    }

    /// Check if this is a dropped-sample diagnostic
    pub fn is_classification_invalid(&self) -> bool {
        matches!(self, Self::ClassificationInvalid { .. })
    }

    /// Check whether the caller may retry the failed operation as-is.
    ///
    /// Booking rejections are retryable (same or different center); a
    /// disconnect needs an explicit channel retry instead.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Booking(BookingError::ServerRejected { .. }) | Self::Transport { .. }
        )
    }
}

impl From<std::io::Error> for FleetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FleetError>`.
pub type Result<T> = std::result::Result<T, FleetError>;
