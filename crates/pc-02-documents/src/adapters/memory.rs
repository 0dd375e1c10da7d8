//! In-memory blob store for tests and embedded hosts.

use crate::ports::outbound::BlobStore;
use parking_lot::RwLock;
use shared_types::{content_hash, Hash};
use std::collections::HashMap;

/// Keeps blobs in a `HashMap` keyed by their SHA-256.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<Hash, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch stored bytes.
    pub fn get(&self, hash: &Hash) -> Option<Vec<u8>> {
        self.blobs.read().get(hash).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(&self, bytes: &[u8]) -> Hash {
        let hash = content_hash(bytes);
        self.blobs
            .write()
            .entry(hash)
            .or_insert_with(|| bytes.to_vec());
        hash
    }

    fn exists(&self, hash: &Hash) -> bool {
        self.blobs.read().contains_key(hash)
    }
}
