//! # Property Ledger Service - Helper Methods
//!
//! Loading, staging and committing. Every mutating operation follows the
//! same path: `begin` -> stage balance deltas -> stamp events -> `commit`.

use super::*;
use crate::adapters::codec::{decode, decode_units, encode, encode_units};
use crate::domain::errors::LedgerError;
use crate::domain::property::{DedupEntry, PropertyRecord, PropertyStatus};
use crate::domain::provenance::{ChainHead, EventPayload, ProvenanceEvent};
use crate::domain::shares::SharePartition;
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::BatchOperation;
use shared_types::{short_hex, Address, Hash, LogicalTime, PropertyId, ShareUnit};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A staged, uncommitted mutation of one property.
///
/// Dropping a `Mutation` without committing it leaves no trace.
pub(crate) struct Mutation {
    pub(crate) property: PropertyId,
    pub(crate) partition: SharePartition,
    head: Option<ChainHead>,
    events: Vec<ProvenanceEvent>,
    extra: Vec<BatchOperation>,
}

impl Mutation {
    /// Mutation of a property that does not exist yet.
    pub(crate) fn genesis(property: PropertyId) -> Self {
        Self {
            property,
            partition: SharePartition::empty(property),
            head: None,
            events: Vec::new(),
            extra: Vec::new(),
        }
    }

    pub(crate) fn is_genesis(&self) -> bool {
        self.head.is_none() && self.events.is_empty()
    }

    /// Stage the next provenance event.
    pub(crate) fn append(
        &mut self,
        actor: Address,
        payload: EventPayload,
        timestamp: LogicalTime,
    ) -> Result<&ProvenanceEvent, LedgerError> {
        let event =
            ProvenanceEvent::next(self.property, self.head.as_ref(), actor, payload, timestamp)?;
        self.head = Some(ChainHead::of(&event));
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    /// Stage a write outside the partition and event log.
    pub(crate) fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.extra.push(BatchOperation::put(key, value));
    }

    pub(crate) fn delete(&mut self, key: Vec<u8>) {
        self.extra.push(BatchOperation::delete(key));
    }
}

impl<KV, TS, DR> PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    // =========================================================================
    // Loading
    // =========================================================================

    pub(crate) fn read_record(&self, id: PropertyId) -> Result<Option<PropertyRecord>, LedgerError> {
        match self.store.get(&KeyPrefix::property_key(id))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn require_record(&self, id: PropertyId) -> Result<PropertyRecord, LedgerError> {
        self.read_record(id)?
            .ok_or(LedgerError::NotFound { property: id })
    }

    /// Load a record that may still be mutated.
    pub(crate) fn active_record(&self, id: PropertyId) -> Result<PropertyRecord, LedgerError> {
        let record = self.require_record(id)?;
        if record.status == PropertyStatus::Retired {
            debug!("[pc-03] rejected mutation of retired property {}", id);
            return Err(LedgerError::PropertyRetired { property: id });
        }
        Ok(record)
    }

    pub(crate) fn load_partition(&self, id: PropertyId) -> Result<SharePartition, LedgerError> {
        let prefix = KeyPrefix::share_prefix(id);
        let mut balances = BTreeMap::new();
        for (key, value) in self.store.prefix_scan(&prefix)? {
            let holder_bytes: [u8; 20] =
                key[prefix.len()..]
                    .try_into()
                    .map_err(|_| LedgerError::Serialization {
                        message: "malformed balance key".to_string(),
                    })?;
            balances.insert(Address(holder_bytes), decode_units(&value)?);
        }
        Ok(SharePartition::new(id, balances))
    }

    pub(crate) fn load_head(&self, id: PropertyId) -> Result<Option<ChainHead>, LedgerError> {
        match self.store.get(&KeyPrefix::chain_head_key(id))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn next_property_id(&self) -> Result<PropertyId, LedgerError> {
        match self.store.get(&KeyPrefix::next_property_id_key())? {
            Some(bytes) => {
                let array: [u8; 8] =
                    bytes
                        .as_slice()
                        .try_into()
                        .map_err(|_| LedgerError::Serialization {
                            message: "malformed property counter".to_string(),
                        })?;
                Ok(PropertyId(u64::from_be_bytes(array)))
            }
            None => Ok(PropertyId::FIRST),
        }
    }

    pub(crate) fn stored_balance(
        &self,
        id: PropertyId,
        holder: &Address,
    ) -> Result<ShareUnit, LedgerError> {
        match self.store.get(&KeyPrefix::share_key(id, holder))? {
            Some(bytes) => decode_units(&bytes),
            None => Ok(0),
        }
    }

    // =========================================================================
    // Policy checks
    // =========================================================================

    /// Fail with `DuplicateMetadata` if another property holds the pair
    /// inside the dedup window. `owner` is the property allowed to keep it.
    pub(crate) fn check_dedup(
        &self,
        creator: &Address,
        metadata_hash: &Hash,
        owner: Option<PropertyId>,
        now: LogicalTime,
    ) -> Result<(), LedgerError> {
        let key = KeyPrefix::dedup_key(creator, metadata_hash);
        if let Some(bytes) = self.store.get(&key)? {
            let entry: DedupEntry = decode(&bytes)?;
            if Some(entry.property) != owner
                && self.config.dedup_window.blocks(entry.registered_at, now)
            {
                debug!(
                    "[pc-03] duplicate metadata 0x{} for {} (existing {})",
                    short_hex(metadata_hash),
                    creator,
                    entry.property
                );
                return Err(LedgerError::DuplicateMetadata {
                    existing: entry.property,
                });
            }
        }
        Ok(())
    }

    /// Whether the dedup slot for the pair is currently held by `id`.
    pub(crate) fn owns_dedup_slot(
        &self,
        id: PropertyId,
        creator: &Address,
        metadata_hash: &Hash,
    ) -> Result<bool, LedgerError> {
        let key = KeyPrefix::dedup_key(creator, metadata_hash);
        match self.store.get(&key)? {
            Some(bytes) => Ok(decode::<DedupEntry>(&bytes)?.property == id),
            None => Ok(false),
        }
    }

    // =========================================================================
    // Request nonces
    // =========================================================================

    /// Highest nonce applied for `signer`, if any.
    pub(crate) fn last_nonce(&self, signer: &Address) -> Result<Option<u64>, LedgerError> {
        match self.store.get(&KeyPrefix::nonce_key(signer))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Carry the nonce write into the next commit.
    pub(crate) fn stage_nonce(&mut self, signer: &Address, nonce: u64) -> Result<(), LedgerError> {
        self.carried
            .push(BatchOperation::put(KeyPrefix::nonce_key(signer), encode(&nonce)?));
        Ok(())
    }

    pub(crate) fn discard_carried(&mut self) {
        self.carried.clear();
    }

    /// Persist carried writes that no commit picked up.
    pub(crate) fn flush_carried(&mut self) -> Result<(), LedgerError> {
        if self.carried.is_empty() {
            return Ok(());
        }
        let operations = std::mem::take(&mut self.carried);
        self.store.atomic_batch_write(operations)?;
        Ok(())
    }

    // =========================================================================
    // Staging & commit
    // =========================================================================

    /// Start a mutation of an existing property.
    pub(crate) fn begin(&self, id: PropertyId) -> Result<Mutation, LedgerError> {
        let head = self.load_head(id)?;
        if head.is_none() {
            return Err(LedgerError::invariant(id, "existing property has no provenance"));
        }
        Ok(Mutation {
            property: id,
            partition: self.load_partition(id)?,
            head,
            events: Vec::new(),
            extra: Vec::new(),
        })
    }

    /// Verify and atomically persist a staged mutation with its record.
    ///
    /// ## Atomicity
    ///
    /// Record, balance deltas, holder index, events, chain head and any
    /// carried writes go out in one `atomic_batch_write`. Any check failing
    /// here returns before the store is touched.
    pub(crate) fn commit(
        &mut self,
        mutation: Mutation,
        record: &PropertyRecord,
    ) -> Result<Vec<ProvenanceEvent>, LedgerError> {
        let id = mutation.property;

        mutation.partition.verify_conservation(record.denominator)?;

        let (first, last) = match (mutation.events.first(), mutation.events.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(LedgerError::invariant(id, "mutation without provenance event")),
        };
        if self.store.exists(&KeyPrefix::event_key(id, first.seq))? {
            return Err(LedgerError::invariant(
                id,
                format!("provenance slot {} already occupied", first.seq),
            ));
        }

        let mut operations = Vec::with_capacity(
            mutation.events.len() + mutation.extra.len() + self.carried.len() + 4,
        );
        operations.push(BatchOperation::put(
            KeyPrefix::property_key(id),
            encode(record)?,
        ));

        for (holder, units) in mutation.partition.changes() {
            if units == 0 {
                operations.push(BatchOperation::delete(KeyPrefix::share_key(id, &holder)));
                operations.push(BatchOperation::delete(KeyPrefix::holding_key(&holder, id)));
            } else {
                operations.push(BatchOperation::put(
                    KeyPrefix::share_key(id, &holder),
                    encode_units(units),
                ));
                operations.push(BatchOperation::put(
                    KeyPrefix::holding_key(&holder, id),
                    Vec::new(),
                ));
            }
        }

        for event in &mutation.events {
            operations.push(BatchOperation::put(
                KeyPrefix::event_key(id, event.seq),
                encode(event)?,
            ));
        }
        operations.push(BatchOperation::put(
            KeyPrefix::chain_head_key(id),
            encode(&ChainHead::of(last))?,
        ));
        operations.extend(mutation.extra);
        operations.extend(self.carried.drain(..));

        self.store.atomic_batch_write(operations)?;

        info!(
            "[pc-03] committed {:?} on {} (seq {}..={}, ts {})",
            first.kind, id, first.seq, last.seq, last.timestamp
        );

        Ok(mutation.events)
    }
}
