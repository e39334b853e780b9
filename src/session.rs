//! Authenticated-session state management.
//!
//! Owns the process-wide "is the vault unlocked" fact. The flag is rewritten
//! only by [`AuthManager::refresh`], which asks the daemon; any failure of
//! that check publishes `false` (fail closed, never fail open). Readers poll
//! [`AuthManager::is_authenticated`] or hold a watch receiver from
//! [`AuthManager::subscribe`].

use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::watch;

use crate::traits::{GatewayError, SessionGateway};

/// Snapshot of the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthState {
    pub authenticated: bool,
}

/// Single source of truth for session authentication.
///
/// Constructed once at startup and shared by reference; all mutation goes
/// through its methods. The state starts unauthenticated until
/// [`AuthManager::initialize`] completes the first check.
pub struct AuthManager {
    gateway: Arc<dyn SessionGateway>,
    state: watch::Sender<AuthState>,
    last_failure: StdMutex<Option<String>>,
}

impl AuthManager {
    pub fn new(gateway: Arc<dyn SessionGateway>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            gateway,
            state,
            last_failure: StdMutex::new(None),
        }
    }

    /// Run the startup session check.
    ///
    /// Call once from the application entry point before dependent code
    /// reads the state. Calling again later just re-checks; concurrent
    /// initializations are not serialized by this type.
    pub async fn initialize(&self) {
        self.refresh().await;
        tracing::debug!(
            authenticated = self.is_authenticated(),
            "session state initialized"
        );
    }

    /// Re-derive the authenticated flag from the daemon.
    ///
    /// On success the returned verdict is published; on any failure the
    /// published flag is `false` and the error is kept for
    /// [`AuthManager::last_failure`]. Overlapping calls are tolerated: each
    /// completion replaces the state atomically, so the last completion
    /// wins.
    pub async fn refresh(&self) {
        match self.gateway.check_session().await {
            Ok(authenticated) => {
                *self.last_failure.lock().unwrap() = None;
                self.state.send_replace(AuthState { authenticated });
                tracing::debug!(authenticated, "session state refreshed");
            }
            Err(e) => {
                tracing::warn!(error = %e, "session check failed, treating session as locked");
                *self.last_failure.lock().unwrap() = Some(e.to_string());
                self.state.send_replace(AuthState {
                    authenticated: false,
                });
            }
        }
    }

    /// Current cached value; never triggers a new check.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().authenticated
    }

    /// Current cached snapshot.
    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    /// Watch receiver that wakes whenever a refresh publishes new state.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Error message from the most recent check, if that check failed.
    ///
    /// Cleared by the next successful check.
    pub fn last_failure(&self) -> Option<String> {
        self.last_failure.lock().unwrap().clone()
    }

    /// Submit the master password to unlock the vault.
    ///
    /// On acceptance the session state is re-checked before returning, so a
    /// successful unlock is immediately visible through
    /// [`AuthManager::is_authenticated`]. On rejection the state is left
    /// untouched and the error is returned for the caller to surface.
    pub async fn unlock(&self, password: &str) -> Result<(), GatewayError> {
        if let Err(e) = self.gateway.verify_master_password(password).await {
            tracing::warn!(error = %e, "master password verification failed");
            return Err(e);
        }
        tracing::info!("vault unlocked");
        self.refresh().await;
        Ok(())
    }

    /// End the session.
    ///
    /// The daemon call is best-effort; whether it succeeds or not, a refresh
    /// follows so the published state tracks whatever the daemon now
    /// believes.
    pub async fn log_out(&self) {
        match self.gateway.log_out().await {
            Ok(()) => tracing::info!("logged out"),
            Err(e) => tracing::warn!(error = %e, "logout request failed"),
        }
        self.refresh().await;
    }
}
