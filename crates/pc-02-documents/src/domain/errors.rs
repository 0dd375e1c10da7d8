//! # Document Errors

use shared_types::{DocumentSetId, Hash};
use thiserror::Error;

/// Errors raised by the document registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// No set with this id has been registered.
    #[error("Document set not found: {0}")]
    NotFound(DocumentSetId),

    /// A set must reference at least one document.
    #[error("Document set is empty")]
    EmptyDocumentSet,

    /// Set exceeds the configured member limit.
    #[error("Too many documents: {count}, max {max}")]
    TooManyDocuments { count: usize, max: usize },

    /// Member hash is not held by the blob store.
    #[error("Unknown document: 0x{}", shared_types::short_hex(.hash))]
    UnknownDocument { hash: Hash },
}
