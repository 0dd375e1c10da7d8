//! # Provenance Events
//!
//! Append-only, hash-chained record of every ownership-affecting action.
//!
//! ## Chain Construction
//!
//! ```text
//! seq 0 (Minted)      prev = GENESIS_PREV_HASH
//! seq 1 (Transferred) prev = hash(seq 0)
//! seq 2 (SplitOpened) prev = hash(seq 1)
//! ...
//! ```
//!
//! `hash(event)` covers every field except the payload body itself, which is
//! bound through `payload_hash`. Reordering, dropping or editing any event
//! breaks the chain at that point.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{content_hash, Address, DocumentSetId, Hash, LogicalTime, PropertyId, ShareUnit};

use crate::domain::shares::Allocation;

/// Fixed `prev_event_hash` of every property's first event.
pub const GENESIS_PREV_HASH: Hash = shared_types::ZERO_HASH;

/// Kind of ownership-affecting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Minted,
    Transferred,
    Split,
    Merged,
    Amended,
    Retired,
}

impl EventKind {
    /// Stable tag used in the event hash.
    pub fn tag(&self) -> u8 {
        match self {
            EventKind::Minted => 0,
            EventKind::Transferred => 1,
            EventKind::Split => 2,
            EventKind::Merged => 3,
            EventKind::Amended => 4,
            EventKind::Retired => 5,
        }
    }
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    Minted {
        to: Address,
        units: ShareUnit,
    },
    Transferred {
        from: Address,
        to: Address,
        units: ShareUnit,
    },
    /// Header of a split; followed by one `SplitAllocated` per leg.
    SplitOpened {
        holder: Address,
        allocations: Vec<Allocation>,
        total_units: ShareUnit,
    },
    SplitAllocated {
        holder: Address,
        to: Address,
        units: ShareUnit,
        index: u32,
    },
    /// Reserved for multi-entry-per-holder compaction; never emitted today.
    Merged {
        holder: Address,
        units: ShareUnit,
    },
    Amended {
        previous_metadata: Hash,
        metadata: Hash,
        previous_document_set: DocumentSetId,
        document_set: DocumentSetId,
    },
    Retired {
        holder: Address,
    },
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Minted { .. } => EventKind::Minted,
            EventPayload::Transferred { .. } => EventKind::Transferred,
            EventPayload::SplitOpened { .. } | EventPayload::SplitAllocated { .. } => {
                EventKind::Split
            }
            EventPayload::Merged { .. } => EventKind::Merged,
            EventPayload::Amended { .. } => EventKind::Amended,
            EventPayload::Retired { .. } => EventKind::Retired,
        }
    }

    /// SHA-256 of the canonical bincode encoding.
    pub fn hash(&self) -> Result<Hash, bincode::Error> {
        Ok(content_hash(&bincode::serialize(self)?))
    }
}

/// One immutable provenance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEvent {
    pub property: PropertyId,
    /// Monotonic per property, starting at 0.
    pub seq: u64,
    pub kind: EventKind,
    pub actor: Address,
    pub payload: EventPayload,
    pub payload_hash: Hash,
    pub prev_event_hash: Hash,
    pub timestamp: LogicalTime,
}

impl ProvenanceEvent {
    /// Build the event that follows `head` (or the genesis event).
    pub fn next(
        property: PropertyId,
        head: Option<&ChainHead>,
        actor: Address,
        payload: EventPayload,
        timestamp: LogicalTime,
    ) -> Result<Self, bincode::Error> {
        let (seq, prev_event_hash) = match head {
            Some(head) => (head.seq + 1, head.hash),
            None => (0, GENESIS_PREV_HASH),
        };
        Ok(Self {
            property,
            seq,
            kind: payload.kind(),
            actor,
            payload_hash: payload.hash()?,
            payload,
            prev_event_hash,
            timestamp,
        })
    }

    /// Hash linking this event to its successor.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(b"parcel-chain/provenance/v1");
        hasher.update(self.property.to_key_bytes());
        hasher.update(self.seq.to_be_bytes());
        hasher.update([self.kind.tag()]);
        hasher.update(self.actor.as_bytes());
        hasher.update(self.payload_hash);
        hasher.update(self.prev_event_hash);
        hasher.update(self.timestamp.to_be_bytes());
        hasher.finalize().into()
    }
}

/// Latest event of a property's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainHead {
    pub seq: u64,
    pub hash: Hash,
}

impl ChainHead {
    pub fn of(event: &ProvenanceEvent) -> Self {
        Self {
            seq: event.seq,
            hash: event.hash(),
        }
    }

    /// Number of events in the chain.
    pub fn len(&self) -> u64 {
        self.seq + 1
    }
}

/// Incremental chain check, fed one event at a time in seq order.
#[derive(Debug, Clone)]
pub struct ChainVerifier {
    property: PropertyId,
    expected_seq: u64,
    expected_prev: Hash,
}

impl ChainVerifier {
    pub fn new(property: PropertyId) -> Self {
        Self {
            property,
            expected_seq: 0,
            expected_prev: GENESIS_PREV_HASH,
        }
    }

    /// Accept the next event; `false` means the chain is broken here.
    pub fn accept(&mut self, event: &ProvenanceEvent) -> bool {
        let payload_ok = event
            .payload
            .hash()
            .map(|h| h == event.payload_hash)
            .unwrap_or(false);

        let linked = event.property == self.property
            && event.seq == self.expected_seq
            && event.prev_event_hash == self.expected_prev
            && event.kind == event.payload.kind()
            && payload_ok;

        if linked {
            self.expected_seq += 1;
            self.expected_prev = event.hash();
        }
        linked
    }

    /// Head implied by the events accepted so far.
    pub fn head(&self) -> Option<ChainHead> {
        (self.expected_seq > 0).then(|| ChainHead {
            seq: self.expected_seq - 1,
            hash: self.expected_prev,
        })
    }
}
