//! Strongroom client core - session, notification, and vault state for the
//! Strongroom password manager UI.
//!
//! The crate keeps a renderer synchronized with two external facts (is the
//! vault unlocked, which notifications should be visible) and mediates
//! loading of vault entries from the local daemon. Rendering itself and the
//! daemon are collaborators behind the trait seams in [`traits`].

pub mod adapters;
pub mod app;
pub mod models;
pub mod password;
pub mod refresh;
pub mod secrets;
pub mod session;
pub mod toast;
pub mod traits;
