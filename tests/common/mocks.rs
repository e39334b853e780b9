//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `strongroom::adapters::mock` and provides wiring helpers for common test
//! scenarios.

pub use strongroom::adapters::mock::{
    MockSecretsGateway, MockSessionGateway, SecretsCall, SequentialIds, SessionCall,
};

use std::sync::Arc;

use strongroom::app::AppCore;
use strongroom::traits::GatewayError;

/// An [`AppCore`] wired over fresh mocks, returned together with the mock
/// handles for scripting and verification.
#[allow(dead_code)]
pub fn mock_core() -> (AppCore, MockSessionGateway, MockSecretsGateway) {
    super::init_tracing();
    let session = MockSessionGateway::new();
    let secrets = MockSecretsGateway::new();
    let core = AppCore::new(Arc::new(session.clone()), Arc::new(secrets.clone()));
    (core, session, secrets)
}

/// A session gateway scripted to report an unlocked vault.
#[allow(dead_code)]
pub fn unlocked_session() -> MockSessionGateway {
    let mock = MockSessionGateway::new();
    mock.set_check_session(Ok(true));
    mock
}

/// A session gateway scripted to be unreachable.
#[allow(dead_code)]
pub fn unreachable_session() -> MockSessionGateway {
    let mock = MockSessionGateway::new();
    mock.set_check_session(Err(GatewayError::ConnectionFailed(
        "connection refused".to_string(),
    )));
    mock
}
