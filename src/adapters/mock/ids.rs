//! Deterministic id source for testing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::traits::IdGenerator;

/// Id source producing `prefix-1`, `prefix-2`, ... in call order.
///
/// Clones share the counter, so ids stay unique across clones.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
