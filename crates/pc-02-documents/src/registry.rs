//! # Document Registry
//!
//! Bookkeeping of content-addressed document sets.
//!
//! Registration is idempotent by content: re-registering an identical set
//! returns the existing id without touching state. Amending a property's
//! documents is modelled as registering a new set and re-pointing the
//! property record, which the ledger logs.

use crate::domain::config::DocumentRegistryConfig;
use crate::domain::entities::DocumentSet;
use crate::domain::errors::DocumentError;
use crate::ports::outbound::BlobStore;
use parking_lot::RwLock;
use shared_types::{DocumentSetId, Hash};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Registry of document sets backed by a blob store.
pub struct DocumentRegistry<B: BlobStore> {
    blobs: B,
    sets: RwLock<HashMap<DocumentSetId, DocumentSet>>,
    config: DocumentRegistryConfig,
}

impl<B: BlobStore> DocumentRegistry<B> {
    pub fn new(blobs: B, config: DocumentRegistryConfig) -> Self {
        Self {
            blobs,
            sets: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Store document bytes in the underlying blob store.
    pub fn store_document(&self, bytes: &[u8]) -> Hash {
        self.blobs.put(bytes)
    }

    /// Register a set of document hashes and return its content id.
    ///
    /// ## Errors
    ///
    /// - `EmptyDocumentSet`: no hashes given
    /// - `TooManyDocuments`: more distinct hashes than the configured limit
    /// - `UnknownDocument`: a hash is not held by the blob store
    pub fn register_set<I>(&self, hashes: I) -> Result<DocumentSetId, DocumentError>
    where
        I: IntoIterator<Item = Hash>,
    {
        let members: BTreeSet<Hash> = hashes.into_iter().collect();

        if members.is_empty() {
            return Err(DocumentError::EmptyDocumentSet);
        }
        if members.len() > self.config.max_documents_per_set {
            return Err(DocumentError::TooManyDocuments {
                count: members.len(),
                max: self.config.max_documents_per_set,
            });
        }
        if let Some(missing) = members.iter().find(|h| !self.blobs.exists(h)) {
            return Err(DocumentError::UnknownDocument { hash: *missing });
        }

        let set = DocumentSet::new(members);
        let id = set.id;

        let mut sets = self.sets.write();
        if sets.contains_key(&id) {
            debug!("[pc-02] document set {} already registered", id);
            return Ok(id);
        }

        info!("[pc-02] registered document set {} ({} documents)", id, set.len());
        sets.insert(id, set);
        Ok(id)
    }

    /// Members of a registered set.
    pub fn get(&self, id: &DocumentSetId) -> Result<BTreeSet<Hash>, DocumentError> {
        self.sets
            .read()
            .get(id)
            .map(|set| set.members.clone())
            .ok_or(DocumentError::NotFound(*id))
    }

    /// Whether a set with this id is registered.
    pub fn contains(&self, id: &DocumentSetId) -> bool {
        self.sets.read().contains_key(id)
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.read().is_empty()
    }

    pub fn config(&self) -> &DocumentRegistryConfig {
        &self.config
    }
}
