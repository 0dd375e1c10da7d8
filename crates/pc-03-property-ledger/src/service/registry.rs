//! # Property Registry Operations
//!
//! Creation, amendment, retirement and lookup of property records.

use super::*;
use crate::adapters::codec::{decode, encode};
use crate::domain::config::AmendPolicy;
use crate::domain::errors::LedgerError;
use crate::domain::property::{DedupEntry, LedgerStats, PropertyRecord, PropertyStatus};
use crate::domain::provenance::{ChainHead, EventPayload};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::inbound::PropertyRegistryApi;
use shared_types::{short_hex, Address, DocumentSetId, Hash, PropertyId, ShareUnit};
use tracing::{debug, info};

/// Property id encoded in the last 8 bytes of a key.
fn id_from_key_tail(key: &[u8]) -> Result<PropertyId, LedgerError> {
    let tail = key
        .len()
        .checked_sub(8)
        .map(|start| &key[start..])
        .ok_or_else(|| LedgerError::Serialization {
            message: format!("key too short for property id: {} bytes", key.len()),
        })?;
    let array: [u8; 8] = tail.try_into().map_err(|_| LedgerError::Serialization {
        message: "malformed property id".to_string(),
    })?;
    Ok(PropertyId(u64::from_be_bytes(array)))
}

impl<KV, TS, DR> PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    fn require_document_set(&self, document_set: &DocumentSetId) -> Result<(), LedgerError> {
        if !self.documents.document_set_exists(document_set) {
            debug!("[pc-03] unknown document set {}", document_set);
            return Err(LedgerError::InvalidDocumentRef {
                document_set: *document_set,
            });
        }
        Ok(())
    }

    fn is_sole_owner(&self, record: &PropertyRecord, caller: &Address) -> Result<bool, LedgerError> {
        Ok(self.stored_balance(record.id, caller)? == record.denominator)
    }

    fn authorize_amend(&self, record: &PropertyRecord, caller: &Address) -> Result<(), LedgerError> {
        if self.is_sole_owner(record, caller)? {
            return Ok(());
        }
        let pristine_creator = record.creator == *caller && record.is_pristine();
        if self.config.amend_policy == AmendPolicy::SoleOwnerOrPristineCreator && pristine_creator {
            return Ok(());
        }
        Err(LedgerError::Unauthorized {
            property: record.id,
            caller: *caller,
            action: "amend",
        })
    }
}

impl<KV, TS, DR> PropertyRegistryApi for PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    fn create(
        &mut self,
        creator: Address,
        metadata_hash: Hash,
        document_set: DocumentSetId,
    ) -> Result<PropertyId, LedgerError> {
        self.require_document_set(&document_set)?;

        let now = self.clock.now();
        self.check_dedup(&creator, &metadata_hash, None, now)?;

        let id = self.next_property_id()?;
        if self.read_record(id)?.is_some() {
            return Err(LedgerError::invariant(id, "property id already allocated"));
        }

        let denominator = self.config.denominator;
        let record = PropertyRecord::new(id, creator, metadata_hash, document_set, now, denominator);

        let mut mutation = Mutation::genesis(id);
        self.mint(&mut mutation, creator, denominator, now)?;
        mutation.put(
            KeyPrefix::dedup_key(&creator, &metadata_hash),
            encode(&DedupEntry {
                property: id,
                registered_at: now,
            })?,
        );
        mutation.put(
            KeyPrefix::next_property_id_key(),
            id.next().to_key_bytes().to_vec(),
        );

        self.commit(mutation, &record)?;
        info!(
            "[pc-03] created {} for {} (metadata 0x{}, {} units)",
            id,
            creator,
            short_hex(&metadata_hash),
            denominator
        );
        Ok(id)
    }

    fn amend(
        &mut self,
        id: PropertyId,
        caller: Address,
        new_metadata_hash: Hash,
        new_document_set: Option<DocumentSetId>,
    ) -> Result<(), LedgerError> {
        let mut record = self.active_record(id)?;
        self.authorize_amend(&record, &caller)?;

        let document_set = match new_document_set {
            Some(document_set) => {
                self.require_document_set(&document_set)?;
                document_set
            }
            None => record.document_set,
        };

        let metadata_changed = new_metadata_hash != record.metadata_hash;
        let now = self.clock.now();
        if metadata_changed {
            self.check_dedup(&record.creator, &new_metadata_hash, Some(id), now)?;
        }

        let mut mutation = self.begin(id)?;
        mutation.append(
            caller,
            EventPayload::Amended {
                previous_metadata: record.metadata_hash,
                metadata: new_metadata_hash,
                previous_document_set: record.document_set,
                document_set,
            },
            now,
        )?;

        if metadata_changed {
            if self.owns_dedup_slot(id, &record.creator, &record.metadata_hash)? {
                mutation.delete(KeyPrefix::dedup_key(&record.creator, &record.metadata_hash));
            }
            mutation.put(
                KeyPrefix::dedup_key(&record.creator, &new_metadata_hash),
                encode(&DedupEntry {
                    property: id,
                    registered_at: now,
                })?,
            );
        }

        record.metadata_hash = new_metadata_hash;
        record.document_set = document_set;
        record.amended_at = Some(now);

        self.commit(mutation, &record)?;
        info!("[pc-03] amended {} (metadata 0x{})", id, short_hex(&new_metadata_hash));
        Ok(())
    }

    fn retire(&mut self, id: PropertyId, caller: Address) -> Result<(), LedgerError> {
        let mut record = self.active_record(id)?;
        if !self.is_sole_owner(&record, &caller)? {
            return Err(LedgerError::Unauthorized {
                property: id,
                caller,
                action: "retire",
            });
        }

        let mut mutation = self.begin(id)?;
        let now = self.clock.now();
        mutation.append(caller, EventPayload::Retired { holder: caller }, now)?;
        record.status = PropertyStatus::Retired;

        self.commit(mutation, &record)?;
        info!("[pc-03] retired {} by {}", id, caller);
        Ok(())
    }

    fn get(&self, id: PropertyId) -> Result<PropertyRecord, LedgerError> {
        self.require_record(id)
    }

    fn list(&self, start: PropertyId, limit: usize) -> Result<Vec<PropertyRecord>, LedgerError> {
        let limit = limit.min(self.config.max_page_size);
        if limit == 0 {
            return Ok(Vec::new());
        }
        let first_key = KeyPrefix::property_key(start);
        self.store
            .prefix_scan(KeyPrefix::Property.as_bytes())?
            .into_iter()
            .filter(|(key, _)| *key >= first_key)
            .take(limit)
            .map(|(_, value)| decode(&value))
            .collect()
    }

    fn properties_of(&self, holder: &Address) -> Result<Vec<PropertyId>, LedgerError> {
        self.store
            .prefix_scan(&KeyPrefix::holding_prefix(holder))?
            .iter()
            .map(|(key, _)| id_from_key_tail(key))
            .collect()
    }

    fn total_units_of(&self, holder: &Address) -> Result<ShareUnit, LedgerError> {
        let mut total: ShareUnit = 0;
        for id in self.properties_of(holder)? {
            total = total.saturating_add(self.stored_balance(id, holder)?);
        }
        Ok(total)
    }

    fn stats(&self) -> Result<LedgerStats, LedgerError> {
        let mut stats = LedgerStats::default();
        for (_, value) in self.store.prefix_scan(KeyPrefix::Property.as_bytes())? {
            let record: PropertyRecord = decode(&value)?;
            stats.total_properties += 1;
            stats.total_ownership_changes = stats
                .total_ownership_changes
                .saturating_add(record.ownership_changes);
            match record.status {
                PropertyStatus::Active => stats.active_properties += 1,
                PropertyStatus::Retired => stats.retired_properties += 1,
            }
        }
        for (_, value) in self.store.prefix_scan(KeyPrefix::ChainHead.as_bytes())? {
            let head: ChainHead = decode(&value)?;
            stats.total_events += head.len();
        }

        // holding keys sort by holder first
        let prefix_len = KeyPrefix::Holding.as_bytes().len();
        let mut previous: Option<Vec<u8>> = None;
        for (key, _) in self.store.prefix_scan(KeyPrefix::Holding.as_bytes())? {
            let holder = key
                .get(prefix_len..prefix_len + 20)
                .ok_or_else(|| LedgerError::Serialization {
                    message: "malformed holding key".to_string(),
                })?;
            if previous.as_deref() != Some(holder) {
                stats.total_holders += 1;
                previous = Some(holder.to_vec());
            }
        }
        Ok(stats)
    }
}
