//! # Document Entities

use serde::{Deserialize, Serialize};
use shared_types::{tagged_hash, DocumentSetId, Hash};
use std::collections::BTreeSet;

const DOCUMENT_SET_TAG: &[u8] = b"parcel-chain/document-set/v1";

/// An immutable, registered set of document hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    pub id: DocumentSetId,
    pub members: BTreeSet<Hash>,
}

impl DocumentSet {
    /// Build a set, deriving its id from the members.
    pub fn new(members: BTreeSet<Hash>) -> Self {
        Self {
            id: document_set_id(&members),
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.members.contains(hash)
    }
}

/// Content-derived id of a member set.
///
/// `BTreeSet` iteration is sorted, so insertion order never affects the id.
pub fn document_set_id(members: &BTreeSet<Hash>) -> DocumentSetId {
    let parts: Vec<&[u8]> = members.iter().map(|h| h.as_slice()).collect();
    DocumentSetId(tagged_hash(DOCUMENT_SET_TAG, &parts))
}
