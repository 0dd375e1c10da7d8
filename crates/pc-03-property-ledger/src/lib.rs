//! # Property Ledger (PC-03)
//!
//! Fractional-ownership ledger for tokenized real-world property: a
//! registry of property records, a share ledger partitioning each property
//! into integer units, and a hash-chained provenance log per property.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Conservation | Balances of a property always sum to its denominator |
//! | 2 | Non-negativity | Overdrafts are rejected before any write |
//! | 3 | Provenance Completeness | Every committed mutation appends its events in the same batch |
//! | 4 | Chain Integrity | `prev_event_hash` of seq n+1 equals the hash of seq n |
//! | 5 | Atomicity | State and provenance commit in one batch, or not at all |
//! | 6 | Retirement Terminality | A retired property accepts no further mutation |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Records, partition arithmetic, provenance events, config
//! - `ports/` - Inbound APIs, outbound store/clock/document traits
//! - `adapters/` - In-memory store, clocks, bincode codec, document lookup
//! - `service/` - `PropertyLedgerService` implementing the APIs
//! - `shared.rs` - `SharedLedger` thread-safe handle
//! - `gateway.rs` - Signed command entry point
//!
//! ## Usage
//!
//! ```ignore
//! use pc_03_property_ledger::{LedgerConfig, PropertyLedgerService, PropertyRegistryApi, ShareLedgerApi};
//!
//! let mut ledger = PropertyLedgerService::new_in_memory(documents, LedgerConfig::default())?;
//! let p = ledger.create(alice, metadata_hash, document_set)?;
//! ledger.transfer(p, alice, bob, 400_000)?;
//! assert!(ledger.verify_chain(p)?);
//! ```

pub mod adapters;
pub mod domain;
pub mod gateway;
pub mod ports;
pub mod service;
pub mod shared;

// Re-export key types for convenience
pub use adapters::{InMemoryKVStore, LogicalClock, SystemTimeSource};
pub use domain::config::{AmendPolicy, ConfigError, DedupWindow, LedgerConfig, DEFAULT_DENOMINATOR};
pub use domain::errors::{ErrorClass, KVStoreError, LedgerError};
pub use domain::property::{LedgerStats, PropertyRecord, PropertyStatus};
pub use domain::provenance::{
    ChainHead, ChainVerifier, EventKind, EventPayload, ProvenanceEvent, GENESIS_PREV_HASH,
};
pub use domain::shares::{Allocation, OwnershipEntry};
pub use domain::value_objects::KeyPrefix;
pub use gateway::{CommandEnvelope, CommandOutcome, GatewayError, LedgerCommand, LedgerGateway};
pub use ports::inbound::{PropertyRegistryApi, ProvenanceLogApi, ShareLedgerApi};
pub use ports::outbound::{BatchOperation, DocumentSetResolver, KeyValueStore, TimeSource};
pub use service::{InMemoryLedger, LedgerDependencies, PropertyLedgerService, ProvenanceHistory};
pub use shared::SharedLedger;
