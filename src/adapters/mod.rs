//! Concrete implementations of trait abstractions.
//!
//! This module provides production adapters implementing the traits defined
//! in `crate::traits`, plus mock implementations for tests.
//!
//! # Adapters
//!
//! - [`DaemonGateway`] - Session and secrets operations over the daemon's REST API
//! - [`UuidIds`] - Random v4 UUID id source
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockSessionGateway`] - Scripted session results
//! - [`mock::MockSecretsGateway`] - In-memory secrets store
//! - [`mock::SequentialIds`] - Deterministic ids

pub mod daemon;
pub mod mock;
pub mod uuid_ids;

pub use daemon::{DaemonGateway, DAEMON_BASE_URL};
pub use uuid_ids::UuidIds;
