//! HTTP gateway to the local vault daemon.
//!
//! Implements both gateway traits against the daemon's REST surface. All
//! session and secret operations go through one reusable client; callers
//! own logging and fallback policy, this adapter only maps transport and
//! status failures onto [`GatewayError`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::{NewSecret, Secret};
use crate::traits::{GatewayError, SecretsGateway, SessionGateway};

/// Default address of the vault daemon on this machine.
pub const DAEMON_BASE_URL: &str = "http://127.0.0.1:7661";

/// Session status payload returned by `GET /v1/session`.
#[derive(Debug, Deserialize)]
struct SessionStatus {
    authenticated: bool,
}

/// Body for `POST /v1/session/unlock`.
#[derive(Debug, Serialize)]
struct UnlockRequest<'a> {
    password: &'a str,
}

/// Creation response from `POST /v1/secrets`.
#[derive(Debug, Deserialize)]
struct CreatedSecret {
    id: String,
}

/// Client for the vault daemon's REST API.
pub struct DaemonGateway {
    /// Base URL for the daemon API
    pub base_url: String,
    /// Reusable HTTP client
    client: Client,
}

impl DaemonGateway {
    /// Create a gateway pointed at the default daemon address.
    pub fn new() -> Self {
        Self {
            base_url: DAEMON_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Create a gateway pointed at a custom daemon address.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a reqwest transport error to a GatewayError.
    fn convert_error(err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else if err.is_connect() {
            GatewayError::ConnectionFailed(err.to_string())
        } else {
            GatewayError::Other(err.to_string())
        }
    }

    /// Turn a non-success response into the matching GatewayError.
    ///
    /// 401 and 403 are daemon verdicts (locked vault, wrong credentials)
    /// and map to [`GatewayError::Rejected`]; everything else is a server
    /// error carrying the response body as its message.
    async fn error_from_response(response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        match status {
            401 | 403 => GatewayError::Rejected(message),
            _ => GatewayError::ServerError { status, message },
        }
    }
}

impl Default for DaemonGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionGateway for DaemonGateway {
    async fn check_session(&self) -> Result<bool, GatewayError> {
        let response = self
            .client
            .get(self.url("/v1/session"))
            .send()
            .await
            .map_err(Self::convert_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let status: SessionStatus = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(status.authenticated)
    }

    async fn verify_master_password(&self, password: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/session/unlock"))
            .json(&UnlockRequest { password })
            .send()
            .await
            .map_err(Self::convert_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    async fn log_out(&self) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/session/logout"))
            .send()
            .await
            .map_err(Self::convert_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl SecretsGateway for DaemonGateway {
    async fn list_secrets(&self) -> Result<Vec<Secret>, GatewayError> {
        let response = self
            .client
            .get(self.url("/v1/secrets"))
            .send()
            .await
            .map_err(Self::convert_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }

    async fn get_secret(&self, id: &str) -> Result<Secret, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/v1/secrets/{}", id)))
            .send()
            .await
            .map_err(Self::convert_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }

    async fn create_secret(&self, secret: &NewSecret) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/secrets"))
            .json(secret)
            .send()
            .await
            .map_err(Self::convert_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let created: CreatedSecret = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(created.id)
    }
}
