//! # Inbound Ports (Driving Ports)
//!
//! The public API of the property ledger.
//!
//! Mutating operations take `&mut self`: a ledger instance is a
//! single-writer state machine and every mutation either commits fully
//! (state + provenance) or returns exactly one error with no side effects.

use crate::domain::errors::LedgerError;
use crate::domain::property::{LedgerStats, PropertyRecord};
use crate::domain::provenance::{ChainHead, ProvenanceEvent};
use crate::domain::shares::{Allocation, OwnershipEntry};
use crate::service::ProvenanceHistory;
use shared_types::{Address, DocumentSetId, Hash, PropertyId, ShareUnit};

/// Creation, amendment and retirement of property records.
pub trait PropertyRegistryApi {
    /// Create a property and mint the full denominator to `creator`.
    ///
    /// ## Errors
    ///
    /// - `DuplicateMetadata`: `(creator, metadata_hash)` already registered
    ///   within the dedup window
    /// - `InvalidDocumentRef`: document set is not registered
    fn create(
        &mut self,
        creator: Address,
        metadata_hash: Hash,
        document_set: DocumentSetId,
    ) -> Result<PropertyId, LedgerError>;

    /// Replace the metadata hash, optionally re-pointing the document set.
    ///
    /// ## Errors
    ///
    /// - `Unauthorized`: caller fails the configured `AmendPolicy`
    /// - `PropertyRetired`, `NotFound`
    /// - `InvalidDocumentRef`, `DuplicateMetadata`
    fn amend(
        &mut self,
        id: PropertyId,
        caller: Address,
        new_metadata_hash: Hash,
        new_document_set: Option<DocumentSetId>,
    ) -> Result<(), LedgerError>;

    /// Retire the property. Caller must hold 100% of units.
    fn retire(&mut self, id: PropertyId, caller: Address) -> Result<(), LedgerError>;

    /// Fetch a record.
    fn get(&self, id: PropertyId) -> Result<PropertyRecord, LedgerError>;

    /// Records with id >= `start`, ascending, at most `limit` (capped by
    /// `max_page_size`).
    fn list(&self, start: PropertyId, limit: usize) -> Result<Vec<PropertyRecord>, LedgerError>;

    /// Properties in which `holder` has a non-zero balance.
    fn properties_of(&self, holder: &Address) -> Result<Vec<PropertyId>, LedgerError>;

    /// Units held by `holder` summed over every property, saturating at
    /// `ShareUnit::MAX`.
    fn total_units_of(&self, holder: &Address) -> Result<ShareUnit, LedgerError>;

    /// Aggregate counters.
    fn stats(&self) -> Result<LedgerStats, LedgerError>;
}

/// Ownership partition operations.
pub trait ShareLedgerApi {
    /// Move `units` from `from` to `to`.
    ///
    /// ## Errors
    ///
    /// - `InvalidAmount`: `units == 0`
    /// - `SelfTransfer`: `from == to`
    /// - `InsufficientShares`: balance of `from` below `units`
    /// - `PropertyRetired`, `NotFound`
    fn transfer(
        &mut self,
        property: PropertyId,
        from: Address,
        to: Address,
        units: ShareUnit,
    ) -> Result<(), LedgerError>;

    /// Distribute part or all of `holder`'s balance in one atomic step.
    ///
    /// ## Errors
    ///
    /// - `InvalidAmount`: empty allocation list or a zero leg
    /// - `SelfTransfer`: a leg pays `holder`
    /// - `TooManyAllocations`: more legs than configured
    /// - `SplitExceedsBalance`: legs sum above the balance
    fn split(
        &mut self,
        property: PropertyId,
        holder: Address,
        allocations: &[Allocation],
    ) -> Result<(), LedgerError>;

    /// Reserved compaction. Entries are unique per holder, so this only
    /// returns the holder's balance and records nothing.
    fn merge(&mut self, property: PropertyId, holder: Address) -> Result<ShareUnit, LedgerError>;

    /// Balance of `holder`; 0 for unknown holders or properties.
    fn balance_of(&self, property: PropertyId, holder: &Address) -> ShareUnit;

    /// Sum of all outstanding units.
    fn total_supply(&self, property: PropertyId) -> Result<ShareUnit, LedgerError>;

    /// Current partition, ordered by holder.
    fn holders(&self, property: PropertyId) -> Result<Vec<OwnershipEntry>, LedgerError>;
}

/// Read side of the provenance log. Appends happen only inside mutations.
pub trait ProvenanceLogApi {
    /// Lazy, restartable iterator over events in ascending seq.
    fn history(&self, property: PropertyId) -> Result<ProvenanceHistory<'_>, LedgerError>;

    /// Point read of one event.
    fn event(&self, property: PropertyId, seq: u64)
        -> Result<Option<ProvenanceEvent>, LedgerError>;

    /// Latest event position and hash.
    fn chain_head(&self, property: PropertyId) -> Result<Option<ChainHead>, LedgerError>;

    /// Recompute the chain from genesis.
    fn verify_chain(&self, property: PropertyId) -> Result<bool, LedgerError>;
}
