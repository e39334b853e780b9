//! Id generation trait abstraction.
//!
//! Notification ids come from an injectable source so tests can use
//! predictable sequences instead of random UUIDs.

/// Trait for generating unique string ids.
pub trait IdGenerator: Send + Sync {
    /// Produce the next id.
    ///
    /// Ids must be unique for the lifetime of the process; they are used to
    /// address queued notifications for removal.
    fn generate(&self) -> String;
}
