//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the ledger service requires the host to provide.

use crate::domain::errors::KVStoreError;
use shared_types::{DocumentSetId, LogicalTime};

/// Result of a prefix scan: `(key, value)` pairs in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
///
/// All keys must support strongly consistent point reads and writes.
/// Testing: `InMemoryKVStore` (adapters/memory_kv.rs)
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// ## Atomicity Guarantee
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    /// Every ledger mutation commits through exactly one call.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Scan keys with a prefix, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Source of logical timestamps for records and events.
pub trait TimeSource: Send + Sync {
    /// Timestamp for the mutation about to commit.
    fn now(&self) -> LogicalTime;
}

/// Read-only view of the document registry.
pub trait DocumentSetResolver: Send + Sync {
    /// Whether the document set is registered.
    fn document_set_exists(&self, id: &DocumentSetId) -> bool;
}
