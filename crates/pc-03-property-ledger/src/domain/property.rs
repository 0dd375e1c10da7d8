//! # Property Entities
//!
//! Records owned exclusively by the property registry.

use serde::{Deserialize, Serialize};
use shared_types::{Address, DocumentSetId, Hash, LogicalTime, PropertyId, ShareUnit};

/// Lifecycle of a property. `Retired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    Active,
    Retired,
}

/// Canonical metadata of a tokenized property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub creator: Address,
    /// Content hash of the off-chain metadata. Changes only via `amend`.
    pub metadata_hash: Hash,
    pub document_set: DocumentSetId,
    pub created_at: LogicalTime,
    pub status: PropertyStatus,
    /// Total units minted, fixed for the life of the property.
    pub denominator: ShareUnit,
    /// Committed transfers and splits since mint.
    pub ownership_changes: u64,
    pub amended_at: Option<LogicalTime>,
}

impl PropertyRecord {
    pub fn new(
        id: PropertyId,
        creator: Address,
        metadata_hash: Hash,
        document_set: DocumentSetId,
        created_at: LogicalTime,
        denominator: ShareUnit,
    ) -> Self {
        Self {
            id,
            creator,
            metadata_hash,
            document_set,
            created_at,
            status: PropertyStatus::Active,
            denominator,
            ownership_changes: 0,
            amended_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PropertyStatus::Active
    }

    /// No transfer or split has ever been committed.
    pub fn is_pristine(&self) -> bool {
        self.ownership_changes == 0
    }
}

/// Registration of a `(creator, metadata_hash)` pair for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupEntry {
    pub property: PropertyId,
    pub registered_at: LogicalTime,
}

/// Aggregate counters over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_properties: u64,
    pub active_properties: u64,
    pub retired_properties: u64,
    /// Distinct addresses with a non-zero balance in any property.
    pub total_holders: u64,
    /// Committed transfers and splits across all properties.
    pub total_ownership_changes: u64,
    pub total_events: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_active_and_pristine() {
        let record = PropertyRecord::new(
            PropertyId(1),
            Address([1; 20]),
            [2; 32],
            DocumentSetId([3; 32]),
            10,
            1_000,
        );
        assert!(record.is_active());
        assert!(record.is_pristine());
        assert_eq!(record.amended_at, None);
    }
}
