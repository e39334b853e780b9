//! Vault daemon gateway traits.
//!
//! Provides trait-based abstractions over the daemon's session and secrets
//! endpoints, enabling dependency injection and mocking in tests.

use async_trait::async_trait;

use crate::models::{NewSecret, Secret};

/// Errors produced by gateway operations.
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// Could not reach the daemon
    ConnectionFailed(String),
    /// Request timed out
    Timeout(String),
    /// Daemon returned an error status
    ServerError { status: u16, message: String },
    /// Daemon refused the operation (bad credentials, locked vault)
    Rejected(String),
    /// Response body could not be parsed
    Malformed(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            GatewayError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            GatewayError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            GatewayError::Rejected(msg) => write!(f, "Request rejected: {}", msg),
            GatewayError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
            GatewayError::Other(msg) => write!(f, "Gateway error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl GatewayError {
    /// Whether the error is a transport problem rather than a daemon verdict.
    ///
    /// Transport problems (unreachable daemon, timeouts) say nothing about the
    /// session; verdicts like [`GatewayError::Rejected`] do.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionFailed(_) | GatewayError::Timeout(_)
        )
    }
}

/// Trait for session lifecycle operations against the daemon.
///
/// Implementations include the production HTTP-based [`DaemonGateway`] and
/// mock gateways for testing.
///
/// [`DaemonGateway`]: crate::adapters::DaemonGateway
///
/// # Example
///
/// ```ignore
/// use strongroom::traits::SessionGateway;
///
/// async fn startup_check<G: SessionGateway>(gateway: &G) -> bool {
///     gateway.check_session().await.unwrap_or(false)
/// }
/// ```
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Ask the daemon whether the current session is authenticated.
    ///
    /// # Returns
    /// `true` if the vault is unlocked for this session, `false` otherwise
    async fn check_session(&self) -> Result<bool, GatewayError>;

    /// Submit the master password to unlock the vault.
    ///
    /// # Arguments
    /// * `password` - The candidate master password, already validated locally
    ///
    /// # Returns
    /// Ok(()) if the daemon accepted the password
    async fn verify_master_password(&self, password: &str) -> Result<(), GatewayError>;

    /// End the current session.
    async fn log_out(&self) -> Result<(), GatewayError>;
}

/// Trait for vault entry operations against the daemon.
#[async_trait]
pub trait SecretsGateway: Send + Sync {
    /// Fetch every entry visible to the current session.
    async fn list_secrets(&self) -> Result<Vec<Secret>, GatewayError>;

    /// Fetch a single entry by id.
    async fn get_secret(&self, id: &str) -> Result<Secret, GatewayError>;

    /// Create a new entry.
    ///
    /// # Returns
    /// The id the daemon assigned to the entry
    async fn create_secret(&self, secret: &NewSecret) -> Result<String, GatewayError>;
}
