//! Application core wiring.
//!
//! [`AppCore`] owns one instance of every state component, built over shared
//! gateway handles. The entry point constructs it once, runs
//! [`AppCore::initialize`] before the first render, and passes the core by
//! reference to whatever needs it; tests build isolated cores over mocks.

use std::sync::Arc;

use crate::adapters::DaemonGateway;
use crate::refresh::RefreshTrigger;
use crate::secrets::{SecretsLoader, SecretsWriter};
use crate::session::AuthManager;
use crate::toast::ToastQueue;
use crate::traits::{SecretsGateway, SessionGateway};

/// The application's state components, wired together.
pub struct AppCore {
    /// Session authentication state
    pub session: AuthManager,
    /// Ephemeral notification queue
    pub toasts: ToastQueue,
    /// Reload signal shared between writers and cached readers
    pub refresh: RefreshTrigger,
    /// Read access to vault entries
    pub secrets: SecretsLoader,
    /// Write access to vault entries; fires `refresh` on success
    pub secrets_writer: SecretsWriter,
}

impl AppCore {
    /// Wire the components over the given gateways.
    pub fn new(
        session_gateway: Arc<dyn SessionGateway>,
        secrets_gateway: Arc<dyn SecretsGateway>,
    ) -> Self {
        let refresh = RefreshTrigger::new();
        Self {
            session: AuthManager::new(session_gateway),
            toasts: ToastQueue::new(),
            secrets: SecretsLoader::new(Arc::clone(&secrets_gateway)),
            secrets_writer: SecretsWriter::new(secrets_gateway, refresh.clone()),
            refresh,
        }
    }

    /// Wire every component against one daemon at `base_url`.
    pub fn with_daemon(base_url: impl Into<String>) -> Self {
        let gateway = Arc::new(DaemonGateway::with_base_url(base_url.into()));
        Self::new(gateway.clone(), gateway)
    }

    /// Startup sequence: complete one session check before dependent code
    /// reads the state.
    pub async fn initialize(&self) {
        self.session.initialize().await;
        tracing::info!(
            authenticated = self.session.is_authenticated(),
            "application core initialized"
        );
    }

    /// Shutdown sequence: dismiss queued notifications and abort their
    /// expiry timers.
    pub fn teardown(&self) {
        self.toasts.clear();
        tracing::debug!("application core torn down");
    }
}
