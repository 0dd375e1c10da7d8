//! # Outbound Ports (Driven Ports)

use shared_types::Hash;

/// Content-addressed store for document bytes.
///
/// `put` must return a collision-resistant hash that is stable across calls;
/// storing the same bytes twice returns the same hash.
pub trait BlobStore: Send + Sync {
    /// Store bytes and return their content hash.
    fn put(&self, bytes: &[u8]) -> Hash;

    /// Whether a blob with this hash is held.
    fn exists(&self, hash: &Hash) -> bool;
}
