//! Mock implementations for testing.
//!
//! This module provides mock implementations of the crate's trait
//! abstractions, enabling unit testing without a running daemon.
//!
//! # Available Mocks
//!
//! - [`MockSessionGateway`] - Scripted session checks, unlocks, and logouts
//! - [`MockSecretsGateway`] - In-memory secrets store with injectable failures
//! - [`SequentialIds`] - Deterministic `prefix-N` id sequence

pub mod gateway;
pub mod ids;

pub use gateway::{MockSecretsGateway, MockSessionGateway, SecretsCall, SessionCall};
pub use ids::SequentialIds;
