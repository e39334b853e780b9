//! Mock gateways for testing.
//!
//! Provides configurable in-process stand-ins for the daemon: a scripted
//! session gateway and an in-memory secrets gateway, both recording calls
//! for verification in tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::models::{NewSecret, Secret};
use crate::traits::{GatewayError, SecretsGateway, SessionGateway};

/// A recorded session gateway call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    CheckSession,
    VerifyMasterPassword { password: String },
    LogOut,
}

/// Scripted session gateway.
///
/// Clones share state, so a test can keep one handle for configuration and
/// hand another to the component under test.
///
/// # Example
///
/// ```ignore
/// use strongroom::adapters::mock::MockSessionGateway;
/// use strongroom::traits::SessionGateway;
///
/// let mock = MockSessionGateway::new();
/// mock.set_check_session(Ok(true));
///
/// assert!(mock.check_session().await.unwrap());
/// assert_eq!(mock.get_calls().len(), 1);
/// ```
#[derive(Clone)]
pub struct MockSessionGateway {
    /// One-shot results served before the fallback, in push order
    check_queue: Arc<Mutex<VecDeque<Result<bool, GatewayError>>>>,
    /// Result served once the queue is empty
    check_fallback: Arc<Mutex<Result<bool, GatewayError>>>,
    verify_result: Arc<Mutex<Result<(), GatewayError>>>,
    logout_result: Arc<Mutex<Result<(), GatewayError>>>,
    /// Recorded calls for verification
    calls: Arc<Mutex<Vec<SessionCall>>>,
}

impl MockSessionGateway {
    /// Create a mock that reports an unauthenticated session and accepts
    /// every unlock and logout.
    pub fn new() -> Self {
        Self {
            check_queue: Arc::new(Mutex::new(VecDeque::new())),
            check_fallback: Arc::new(Mutex::new(Ok(false))),
            verify_result: Arc::new(Mutex::new(Ok(()))),
            logout_result: Arc::new(Mutex::new(Ok(()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the result every future session check returns.
    pub fn set_check_session(&self, result: Result<bool, GatewayError>) {
        *self.check_fallback.lock().unwrap() = result;
    }

    /// Queue a one-shot session check result, served before the fallback.
    pub fn push_check_session(&self, result: Result<bool, GatewayError>) {
        self.check_queue.lock().unwrap().push_back(result);
    }

    /// Set the result master password verification returns.
    pub fn set_verify_master_password(&self, result: Result<(), GatewayError>) {
        *self.verify_result.lock().unwrap() = result;
    }

    /// Set the result logout returns.
    pub fn set_log_out(&self, result: Result<(), GatewayError>) {
        *self.logout_result.lock().unwrap() = result;
    }

    /// Get all recorded calls.
    pub fn get_calls(&self) -> Vec<SessionCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: SessionCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockSessionGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionGateway for MockSessionGateway {
    async fn check_session(&self) -> Result<bool, GatewayError> {
        self.record(SessionCall::CheckSession);
        if let Some(result) = self.check_queue.lock().unwrap().pop_front() {
            return result;
        }
        self.check_fallback.lock().unwrap().clone()
    }

    async fn verify_master_password(&self, password: &str) -> Result<(), GatewayError> {
        self.record(SessionCall::VerifyMasterPassword {
            password: password.to_string(),
        });
        self.verify_result.lock().unwrap().clone()
    }

    async fn log_out(&self) -> Result<(), GatewayError> {
        self.record(SessionCall::LogOut);
        self.logout_result.lock().unwrap().clone()
    }
}

/// A recorded secrets gateway call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsCall {
    ListSecrets,
    GetSecret { id: String },
    CreateSecret { name: String },
}

/// In-memory secrets gateway.
///
/// Serves reads from a seeded store and appends creations to it with
/// generated `secret-N` ids. Any operation can be made to fail by
/// injecting an error.
#[derive(Clone)]
pub struct MockSecretsGateway {
    store: Arc<Mutex<Vec<Secret>>>,
    next_id: Arc<Mutex<u32>>,
    list_error: Arc<Mutex<Option<GatewayError>>>,
    get_error: Arc<Mutex<Option<GatewayError>>>,
    create_error: Arc<Mutex<Option<GatewayError>>>,
    calls: Arc<Mutex<Vec<SecretsCall>>>,
}

impl MockSecretsGateway {
    /// Create a mock with an empty store and no injected failures.
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(0)),
            list_error: Arc::new(Mutex::new(None)),
            get_error: Arc::new(Mutex::new(None)),
            create_error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the stored entries.
    pub fn seed(&self, secrets: Vec<Secret>) {
        *self.store.lock().unwrap() = secrets;
    }

    /// Snapshot of the stored entries.
    pub fn stored(&self) -> Vec<Secret> {
        self.store.lock().unwrap().clone()
    }

    /// Make every list call fail with this error.
    pub fn set_list_error(&self, error: GatewayError) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    /// Make every get call fail with this error.
    pub fn set_get_error(&self, error: GatewayError) {
        *self.get_error.lock().unwrap() = Some(error);
    }

    /// Make every create call fail with this error.
    pub fn set_create_error(&self, error: GatewayError) {
        *self.create_error.lock().unwrap() = Some(error);
    }

    /// Remove all injected failures.
    pub fn clear_errors(&self) {
        *self.list_error.lock().unwrap() = None;
        *self.get_error.lock().unwrap() = None;
        *self.create_error.lock().unwrap() = None;
    }

    /// Get all recorded calls.
    pub fn get_calls(&self) -> Vec<SecretsCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of list calls seen so far.
    pub fn list_call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, SecretsCall::ListSecrets))
            .count()
    }

    fn record(&self, call: SecretsCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockSecretsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretsGateway for MockSecretsGateway {
    async fn list_secrets(&self) -> Result<Vec<Secret>, GatewayError> {
        self.record(SecretsCall::ListSecrets);
        if let Some(error) = self.list_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.store.lock().unwrap().clone())
    }

    async fn get_secret(&self, id: &str) -> Result<Secret, GatewayError> {
        self.record(SecretsCall::GetSecret { id: id.to_string() });
        if let Some(error) = self.get_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|secret| secret.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::ServerError {
                status: 404,
                message: format!("no secret with id {}", id),
            })
    }

    async fn create_secret(&self, secret: &NewSecret) -> Result<String, GatewayError> {
        self.record(SecretsCall::CreateSecret {
            name: secret.name.clone(),
        });
        if let Some(error) = self.create_error.lock().unwrap().clone() {
            return Err(error);
        }
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            format!("secret-{}", next_id)
        };
        self.store.lock().unwrap().push(Secret {
            id: id.clone(),
            kind: secret.kind.clone(),
            name: secret.name.clone(),
            value: secret.value.clone(),
        });
        Ok(id)
    }
}
