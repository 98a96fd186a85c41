//! Infrastructure adapters for the AutoDoc client.
//!
//! Implements the `autodoc-core` collaborator traits against the real fleet
//! backend: WebSocket telemetry, HTTP booking/auth, the static service
//! center directory, and TOML client configuration.

mod auth_http;
mod booking_http;
mod centers;
mod config;
mod telemetry_ws;

pub use auth_http::HttpAuthClient;
pub use booking_http::HttpBookingClient;
pub use centers::StaticCenterDirectory;
pub use config::ClientConfig;
pub use telemetry_ws::WsTelemetrySource;
