//! # Value Objects
//!
//! Storage key layout for the ledger's key-value store.

use shared_types::{Address, Hash, PropertyId};

/// Key prefixes for the key-value store.
///
/// All keys are prefixed to namespace different data types. Numeric
/// components are big-endian so prefix scans return ascending order.
#[derive(Debug, Clone, Copy)]
pub enum KeyPrefix {
    /// Property record: `p:{id}` -> PropertyRecord
    Property,
    /// Balance: `s:{id}{holder}` -> ShareUnit
    Share,
    /// Provenance event: `e:{id}{seq}` -> ProvenanceEvent
    Event,
    /// Chain head: `c:{id}` -> ChainHead
    ChainHead,
    /// Dedup index: `u:{creator}{metadata}` -> DedupEntry
    Dedup,
    /// Holder index: `o:{holder}{id}` -> ()
    Holding,
    /// Last applied request nonce: `n:{signer}` -> u64
    Nonce,
    /// Ledger metadata: `m:{name}`
    Meta,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Property => b"p:",
            KeyPrefix::Share => b"s:",
            KeyPrefix::Event => b"e:",
            KeyPrefix::ChainHead => b"c:",
            KeyPrefix::Dedup => b"u:",
            KeyPrefix::Holding => b"o:",
            KeyPrefix::Nonce => b"n:",
            KeyPrefix::Meta => b"m:",
        }
    }

    /// Build a full key from suffix parts.
    pub fn key(&self, parts: &[&[u8]]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        for part in parts {
            key.extend_from_slice(part);
        }
        key
    }

    pub fn property_key(id: PropertyId) -> Vec<u8> {
        KeyPrefix::Property.key(&[&id.to_key_bytes()])
    }

    pub fn share_key(id: PropertyId, holder: &Address) -> Vec<u8> {
        KeyPrefix::Share.key(&[&id.to_key_bytes(), holder.as_bytes()])
    }

    /// Prefix covering every balance of one property.
    pub fn share_prefix(id: PropertyId) -> Vec<u8> {
        KeyPrefix::Share.key(&[&id.to_key_bytes()])
    }

    pub fn event_key(id: PropertyId, seq: u64) -> Vec<u8> {
        KeyPrefix::Event.key(&[&id.to_key_bytes(), &seq.to_be_bytes()])
    }

    pub fn chain_head_key(id: PropertyId) -> Vec<u8> {
        KeyPrefix::ChainHead.key(&[&id.to_key_bytes()])
    }

    pub fn dedup_key(creator: &Address, metadata_hash: &Hash) -> Vec<u8> {
        KeyPrefix::Dedup.key(&[creator.as_bytes(), metadata_hash])
    }

    pub fn holding_key(holder: &Address, id: PropertyId) -> Vec<u8> {
        KeyPrefix::Holding.key(&[holder.as_bytes(), &id.to_key_bytes()])
    }

    /// Prefix covering every holding of one address.
    pub fn holding_prefix(holder: &Address) -> Vec<u8> {
        KeyPrefix::Holding.key(&[holder.as_bytes()])
    }

    pub fn nonce_key(signer: &Address) -> Vec<u8> {
        KeyPrefix::Nonce.key(&[signer.as_bytes()])
    }

    pub fn next_property_id_key() -> Vec<u8> {
        KeyPrefix::Meta.key(&[b"next_property_id".as_slice()])
    }
}
