//! UUID-backed id source.

use uuid::Uuid;

use crate::traits::IdGenerator;

/// Production id source generating random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
