//! # Shared Ledger Handle
//!
//! Cloneable handle for callers on several threads. Writes take the lock
//! exclusively, so one mutation commits fully before the next begins;
//! reads share it.

use crate::domain::errors::LedgerError;
use crate::domain::property::{LedgerStats, PropertyRecord};
use crate::domain::provenance::{ChainHead, ProvenanceEvent};
use crate::domain::shares::{Allocation, OwnershipEntry};
use crate::ports::inbound::{PropertyRegistryApi, ProvenanceLogApi, ShareLedgerApi};
use crate::ports::outbound::{DocumentSetResolver, KeyValueStore, TimeSource};
use crate::service::PropertyLedgerService;
use parking_lot::RwLock;
use shared_types::{Address, DocumentSetId, Hash, PropertyId, ShareUnit};
use std::sync::Arc;

/// Thread-safe wrapper around `PropertyLedgerService`.
pub struct SharedLedger<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    inner: Arc<RwLock<PropertyLedgerService<KV, TS, DR>>>,
}

impl<KV, TS, DR> Clone for SharedLedger<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<KV, TS, DR> SharedLedger<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    pub fn new(service: PropertyLedgerService<KV, TS, DR>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(service)),
        }
    }

    /// Run `f` under the shared read lock.
    pub fn read<R>(&self, f: impl FnOnce(&PropertyLedgerService<KV, TS, DR>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under the exclusive write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut PropertyLedgerService<KV, TS, DR>) -> R) -> R {
        f(&mut self.inner.write())
    }

    // =========================================================================
    // Registry
    // =========================================================================

    pub fn create(
        &self,
        creator: Address,
        metadata_hash: Hash,
        document_set: DocumentSetId,
    ) -> Result<PropertyId, LedgerError> {
        self.inner.write().create(creator, metadata_hash, document_set)
    }

    pub fn amend(
        &self,
        id: PropertyId,
        caller: Address,
        new_metadata_hash: Hash,
        new_document_set: Option<DocumentSetId>,
    ) -> Result<(), LedgerError> {
        self.inner
            .write()
            .amend(id, caller, new_metadata_hash, new_document_set)
    }

    pub fn retire(&self, id: PropertyId, caller: Address) -> Result<(), LedgerError> {
        self.inner.write().retire(id, caller)
    }

    pub fn get(&self, id: PropertyId) -> Result<PropertyRecord, LedgerError> {
        self.inner.read().get(id)
    }

    pub fn list(&self, start: PropertyId, limit: usize) -> Result<Vec<PropertyRecord>, LedgerError> {
        self.inner.read().list(start, limit)
    }

    pub fn properties_of(&self, holder: &Address) -> Result<Vec<PropertyId>, LedgerError> {
        self.inner.read().properties_of(holder)
    }

    pub fn total_units_of(&self, holder: &Address) -> Result<ShareUnit, LedgerError> {
        self.inner.read().total_units_of(holder)
    }

    pub fn stats(&self) -> Result<LedgerStats, LedgerError> {
        self.inner.read().stats()
    }

    // =========================================================================
    // Shares
    // =========================================================================

    pub fn transfer(
        &self,
        property: PropertyId,
        from: Address,
        to: Address,
        units: ShareUnit,
    ) -> Result<(), LedgerError> {
        self.inner.write().transfer(property, from, to, units)
    }

    pub fn split(
        &self,
        property: PropertyId,
        holder: Address,
        allocations: &[Allocation],
    ) -> Result<(), LedgerError> {
        self.inner.write().split(property, holder, allocations)
    }

    pub fn merge(&self, property: PropertyId, holder: Address) -> Result<ShareUnit, LedgerError> {
        self.inner.write().merge(property, holder)
    }

    pub fn balance_of(&self, property: PropertyId, holder: &Address) -> ShareUnit {
        self.inner.read().balance_of(property, holder)
    }

    pub fn total_supply(&self, property: PropertyId) -> Result<ShareUnit, LedgerError> {
        self.inner.read().total_supply(property)
    }

    pub fn holders(&self, property: PropertyId) -> Result<Vec<OwnershipEntry>, LedgerError> {
        self.inner.read().holders(property)
    }

    // =========================================================================
    // Provenance
    // =========================================================================

    /// Snapshot of the full history. Use `read` with `history` to stream.
    pub fn history(&self, property: PropertyId) -> Result<Vec<ProvenanceEvent>, LedgerError> {
        self.inner.read().history(property)?.collect()
    }

    pub fn event(&self, property: PropertyId, seq: u64) -> Result<Option<ProvenanceEvent>, LedgerError> {
        self.inner.read().event(property, seq)
    }

    pub fn chain_head(&self, property: PropertyId) -> Result<Option<ChainHead>, LedgerError> {
        self.inner.read().chain_head(property)
    }

    pub fn verify_chain(&self, property: PropertyId) -> Result<bool, LedgerError> {
        self.inner.read().verify_chain(property)
    }
}
