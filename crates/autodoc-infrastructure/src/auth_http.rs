//! HTTP login client.
//!
//! Maps the backend's `/login` response into a domain `Session`. Credential
//! correctness lives server-side; this adapter only translates.

use crate::config::ClientConfig;
use async_trait::async_trait;
use autodoc_core::auth::AuthProvider;
use autodoc_core::session::{Session, SessionIdentity, SessionRole};
use autodoc_core::vehicle::Vehicle;
use autodoc_core::{FleetError, Result};
use autodoc_types::{DealerProfileDto, LoginRequestDto, LoginResponseDto, OwnerProfileDto};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub struct HttpAuthClient {
    client: Client,
    api_base: String,
}

impl HttpAuthClient {
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
impl AuthProvider for HttpAuthClient {
    async fn login(&self, username: &str, password: &str, role: SessionRole) -> Result<Session> {
        let body = LoginRequestDto {
            username: username.to_string(),
            password: password.to_string(),
            role: role.wire_name().to_string(),
        };
        let response = self
            .client
            .post(format!("{}/login", self.api_base))
            .json(&body)
            .send()
            .await
            .map_err(|e| FleetError::transport(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(FleetError::auth("invalid credentials")),
            status if !status.is_success() => {
                Err(FleetError::auth(format!("login failed: {status}")))
            }
            _ => {
                let dto: LoginResponseDto = response
                    .json()
                    .await
                    .map_err(|e| FleetError::auth(format!("undecodable login response: {e}")))?;
                session_from_response(username, dto)
            }
        }
    }
}

fn session_from_response(username: &str, dto: LoginResponseDto) -> Result<Session> {
    let role = SessionRole::from_wire(&dto.role)
        .ok_or_else(|| FleetError::auth(format!("unknown role '{}'", dto.role)))?;
    match role {
        SessionRole::Owner => {
            let profile: OwnerProfileDto = serde_json::from_value(dto.data)?;
            let identity = SessionIdentity {
                username: profile.username.unwrap_or_else(|| username.to_string()),
                full_name: profile.full_name,
            };
            let vehicles = profile.vehicles.into_iter().map(Vehicle::from).collect();
            Ok(Session::new_owner(identity, vehicles))
        }
        SessionRole::Dealer => {
            let profile: DealerProfileDto = serde_json::from_value(dto.data)?;
            let identity = SessionIdentity {
                username: username.to_string(),
                full_name: profile.full_name,
            };
            Ok(Session::new_dealer(identity))
        }
    }
}
