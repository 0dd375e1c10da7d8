//! # Property Ledger Service
//!
//! The main service implementing the registry, share ledger and provenance
//! APIs over one key-value store.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `PropertyRegistryApi`, `ShareLedgerApi` and `ProvenanceLogApi`
//! 2. Stages every mutation in a `Mutation` (partition copy + new events)
//! 3. Re-verifies conservation on the staged partition before commit
//! 4. Commits ledger state and provenance in ONE atomic batch
//! 5. Uses dependency injection for store, clock and document lookup

mod helpers;
mod provenance;
mod registry;
mod shares;

pub use provenance::ProvenanceHistory;

pub(crate) use helpers::Mutation;

use crate::adapters::{InMemoryKVStore, LogicalClock};
use crate::domain::config::{ConfigError, LedgerConfig};
use crate::ports::outbound::{BatchOperation, DocumentSetResolver, KeyValueStore, TimeSource};
use tracing::info;

/// The Property Ledger Service.
///
/// A single-writer state machine: mutations take `&mut self` and run to
/// completion. Wrap in `SharedLedger` for concurrent callers.
pub struct PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    /// Key-value store holding records, balances and events.
    pub(crate) store: KV,
    /// Timestamp source for records and events.
    pub(crate) clock: TS,
    /// Document registry lookup.
    pub(crate) documents: DR,
    /// Service configuration.
    pub(crate) config: LedgerConfig,
    /// Writes that ride along with the next commit.
    pub(crate) carried: Vec<BatchOperation>,
}

/// Dependencies for PropertyLedgerService.
pub struct LedgerDependencies<KV, TS, DR> {
    pub store: KV,
    pub clock: TS,
    pub documents: DR,
}

/// Ledger over the in-memory store and logical clock.
pub type InMemoryLedger<DR> = PropertyLedgerService<InMemoryKVStore, LogicalClock, DR>;

impl<KV, TS, DR> PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    /// Create a service with the given dependencies.
    ///
    /// ## Errors
    ///
    /// Returns the first `ConfigError` reported by `LedgerConfig::validate`.
    pub fn new(
        deps: LedgerDependencies<KV, TS, DR>,
        config: LedgerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "[pc-03] property ledger ready (denominator {}, dedup {:?}, amend {:?})",
            config.denominator, config.dedup_window, config.amend_policy
        );
        Ok(Self {
            store: deps.store,
            clock: deps.clock,
            documents: deps.documents,
            config,
            carried: Vec::new(),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &KV {
        &self.store
    }
}

impl<DR: DocumentSetResolver> PropertyLedgerService<InMemoryKVStore, LogicalClock, DR> {
    /// Create a service with an empty in-memory store and a fresh logical clock.
    pub fn new_in_memory(documents: DR, config: LedgerConfig) -> Result<Self, ConfigError> {
        Self::new(
            LedgerDependencies {
                store: InMemoryKVStore::new(),
                clock: LogicalClock::new(),
                documents,
            },
            config,
        )
    }
}
