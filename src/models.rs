use serde::{Deserialize, Serialize};

/// A stored vault entry as returned by the daemon API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Secret {
    /// Unique identifier assigned by the daemon
    pub id: String,
    /// Entry kind (e.g. "login", "note")
    #[serde(default)]
    pub kind: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// The secret material itself
    #[serde(default)]
    pub value: String,
}

/// Payload for creating a new vault entry. The daemon assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSecret {
    pub kind: String,
    pub name: String,
    pub value: String,
}

impl NewSecret {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}
