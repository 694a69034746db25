//! Content-addressed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BLAKE3 hash over the (prices, confidences) inputs of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    pub fn from_hash(hash: &str) -> Self {
        Self(hash.to_string())
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic run ID: engine parameters + dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    /// Derive the run ID from a canonical parameter string and the dataset hash.
    pub fn derive(params: &str, dataset_hash: &DatasetHash) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(params.as_bytes());
        hasher.update(b"|");
        hasher.update(dataset_hash.0.as_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    /// First 12 hex chars, used for artifact directory names.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
