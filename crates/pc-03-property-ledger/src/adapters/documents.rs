//! Document registry lookup for property creation and amendment.

use crate::ports::outbound::DocumentSetResolver;
use pc_02_documents::{BlobStore, DocumentRegistry};
use shared_types::DocumentSetId;
use std::sync::Arc;

impl<B: BlobStore> DocumentSetResolver for DocumentRegistry<B> {
    fn document_set_exists(&self, id: &DocumentSetId) -> bool {
        self.contains(id)
    }
}

impl<T: DocumentSetResolver + ?Sized> DocumentSetResolver for Arc<T> {
    fn document_set_exists(&self, id: &DocumentSetId) -> bool {
        (**self).document_set_exists(id)
    }
}
