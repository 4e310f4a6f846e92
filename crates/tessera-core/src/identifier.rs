//! Block identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a block within its document.
///
/// Identifiers come from the surrounding application and are never
/// interpreted; new blocks created by the editor receive `block-<n>` ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Creates an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates the identifier the editor assigns to its `seq`-th new block
    pub fn generated(seq: u64) -> Self {
        Self(format!("block-{seq}"))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
