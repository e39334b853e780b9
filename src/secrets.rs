//! Vault entry loading and creation.
//!
//! Reads degrade instead of failing: a page asking for the secret list must
//! always get a usable (possibly empty) result, never an error to handle.
//! Writes are different; creation reports failure to the caller and, on
//! success, fires the refresh trigger so cached readers re-fetch.

use std::sync::{Arc, Mutex as StdMutex};

use crate::models::{NewSecret, Secret};
use crate::refresh::RefreshTrigger;
use crate::traits::{GatewayError, SecretsGateway};

/// Read-side facade over the secrets gateway.
///
/// Holds no cache; every call re-fetches. Consumers that cache the result
/// subscribe to the application's [`RefreshTrigger`] to learn when to call
/// again.
pub struct SecretsLoader {
    gateway: Arc<dyn SecretsGateway>,
    last_failure: StdMutex<Option<String>>,
}

impl SecretsLoader {
    pub fn new(gateway: Arc<dyn SecretsGateway>) -> Self {
        Self {
            gateway,
            last_failure: StdMutex::new(None),
        }
    }

    /// Fetch the full entry list for display.
    ///
    /// On failure returns an empty list and records the error; see
    /// [`SecretsLoader::last_failure`].
    pub async fn load(&self) -> Vec<Secret> {
        match self.gateway.list_secrets().await {
            Ok(secrets) => {
                *self.last_failure.lock().unwrap() = None;
                tracing::debug!(count = secrets.len(), "loaded secrets");
                secrets
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load secrets, showing none");
                *self.last_failure.lock().unwrap() = Some(e.to_string());
                Vec::new()
            }
        }
    }

    /// Fetch a single entry, or `None` if it is missing or the daemon is
    /// unreachable.
    pub async fn load_one(&self, id: &str) -> Option<Secret> {
        match self.gateway.get_secret(id).await {
            Ok(secret) => {
                *self.last_failure.lock().unwrap() = None;
                Some(secret)
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "failed to load secret");
                *self.last_failure.lock().unwrap() = Some(e.to_string());
                None
            }
        }
    }

    /// Error message from the most recent fetch, if that fetch failed.
    pub fn last_failure(&self) -> Option<String> {
        self.last_failure.lock().unwrap().clone()
    }
}

/// Write-side facade over the secrets gateway.
pub struct SecretsWriter {
    gateway: Arc<dyn SecretsGateway>,
    trigger: RefreshTrigger,
}

impl SecretsWriter {
    pub fn new(gateway: Arc<dyn SecretsGateway>, trigger: RefreshTrigger) -> Self {
        Self { gateway, trigger }
    }

    /// Create a vault entry and return the id the daemon assigned.
    ///
    /// Fires the refresh trigger on success so cached lists re-fetch; on
    /// failure nothing is fired and the error is returned for the caller to
    /// surface to the user.
    pub async fn create(&self, secret: &NewSecret) -> Result<String, GatewayError> {
        let id = self.gateway.create_secret(secret).await?;
        tracing::info!(id = %id, name = %secret.name, "created secret");
        self.trigger.fire();
        Ok(id)
    }
}
