//! # Registry Configuration

use serde::Deserialize;

/// Limits applied by `DocumentRegistry::register_set`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentRegistryConfig {
    /// Maximum members per set (default: 256).
    pub max_documents_per_set: usize,
}

impl Default for DocumentRegistryConfig {
    fn default() -> Self {
        Self {
            max_documents_per_set: 256,
        }
    }
}

impl DocumentRegistryConfig {
    pub fn with_max_documents_per_set(mut self, max: usize) -> Self {
        self.max_documents_per_set = max;
        self
    }
}
