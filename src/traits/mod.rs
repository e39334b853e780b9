//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for the crate's seams,
//! enabling dependency injection, mocking, and better testability.
//!
//! # Traits
//!
//! - [`SessionGateway`] - Session checks, unlock, and logout against the daemon
//! - [`SecretsGateway`] - Vault entry reads and writes against the daemon
//! - [`IdGenerator`] - Notification id generation

pub mod gateway;
pub mod ids;

pub use gateway::{GatewayError, SecretsGateway, SessionGateway};
pub use ids::IdGenerator;
