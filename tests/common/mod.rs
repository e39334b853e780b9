//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures and mock configurations for
//! integration testing the state layer.
//!
//! # Example
//!
//! ```ignore
//! use common::{mock_core, sample_secret};
//!
//! let (core, session, secrets) = mock_core();
//! secrets.seed(vec![sample_secret("s-1", "email")]);
//! core.initialize().await;
//! ```

pub mod mocks;

pub use mocks::*;

use strongroom::models::Secret;

/// Route tracing output through the test harness, honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a subscriber.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A vault entry fixture with the given id and name.
#[allow(dead_code)]
pub fn sample_secret(id: &str, name: &str) -> Secret {
    Secret {
        id: id.to_string(),
        kind: "login".to_string(),
        name: name.to_string(),
        value: "hunter2".to_string(),
    }
}

/// A small fixture set in a stable order.
#[allow(dead_code)]
pub fn sample_secrets() -> Vec<Secret> {
    vec![
        sample_secret("s-1", "email"),
        sample_secret("s-2", "bank"),
        sample_secret("s-3", "wifi"),
    ]
}
