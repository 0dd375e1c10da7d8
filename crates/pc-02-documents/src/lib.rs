//! # Document Registry (PC-02)
//!
//! Maps content hashes of off-chain documents (deeds, titles, images) to
//! content-addressed document sets that property records point at.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Identity by Content | The same member set always yields the same `DocumentSetId` |
//! | 2 | Known Blobs Only | Every member hash must exist in the blob store |
//! | 3 | Immutability | A registered set is never modified; amendments register a new set |
//!
//! The registry never owns document bytes; it only records hashes handed
//! back by the `BlobStore` port.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;

pub use adapters::memory::InMemoryBlobStore;
pub use domain::config::DocumentRegistryConfig;
pub use domain::entities::{document_set_id, DocumentSet};
pub use domain::errors::DocumentError;
pub use ports::outbound::BlobStore;
pub use registry::DocumentRegistry;
