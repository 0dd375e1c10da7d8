//! # Test Fixtures
//!
//! Shared builders for integration tests and benchmarks.

use pc_02_documents::{DocumentRegistry, DocumentRegistryConfig, InMemoryBlobStore};
use pc_03_property_ledger::{
    InMemoryKVStore, InMemoryLedger, LedgerConfig, LogicalClock, PropertyLedgerService,
    SharedLedger,
};
use shared_types::{Address, DocumentSetId, Hash};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

pub type Documents = Arc<DocumentRegistry<InMemoryBlobStore>>;
pub type TestLedger = InMemoryLedger<Documents>;
pub type TestSharedLedger = SharedLedger<InMemoryKVStore, LogicalClock, Documents>;

pub const ALICE: Address = Address([0xA1; 20]);
pub const BOB: Address = Address([0xB0; 20]);
pub const CAROL: Address = Address([0xC4; 20]);

/// `h1` of the reference scenarios.
pub fn metadata_h1() -> Hash {
    hash_from_hex("4f1c2a9e0d6b3f7a8c5e1d2b9a0f6e3c7d4b8a1e5f2c9d0b6a3e7f1c4d8b2a5e")
}

pub fn metadata_h2() -> Hash {
    hash_from_hex("9a3e7f1c4d8b2a5e4f1c2a9e0d6b3f7a8c5e1d2b9a0f6e3c7d4b8a1e5f2c9d0b")
}

fn hash_from_hex(raw: &str) -> Hash {
    let bytes = hex::decode(raw).expect("fixture hex is valid");
    bytes.try_into().expect("fixture hash is 32 bytes")
}

/// Install a `RUST_LOG`-driven subscriber once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Document registry holding one registered set (`docs1`).
pub fn make_documents() -> (Documents, DocumentSetId) {
    let documents = Arc::new(DocumentRegistry::new(
        InMemoryBlobStore::new(),
        DocumentRegistryConfig::default(),
    ));
    let deed = documents.store_document(b"deed: 12 harbour street, lot 7");
    let survey = documents.store_document(b"survey: 412 m2");
    let docs1 = documents
        .register_set([deed, survey])
        .expect("fixture documents are stored");
    (documents, docs1)
}

pub fn make_ledger(config: LedgerConfig) -> (TestLedger, Documents, DocumentSetId) {
    init_tracing();
    let (documents, docs1) = make_documents();
    let ledger = PropertyLedgerService::new_in_memory(documents.clone(), config)
        .expect("fixture config is valid");
    (ledger, documents, docs1)
}

pub fn make_shared_ledger() -> (TestSharedLedger, DocumentSetId) {
    let (ledger, _, docs1) = make_ledger(LedgerConfig::default());
    (SharedLedger::new(ledger), docs1)
}
