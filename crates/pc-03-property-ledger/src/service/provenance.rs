//! # Provenance Log Operations
//!
//! Read side of the hash-chained event log. Events are appended only by
//! committed mutations (see `helpers.rs`).

use super::*;
use crate::adapters::codec::decode;
use crate::domain::errors::LedgerError;
use crate::domain::provenance::{ChainHead, ChainVerifier, ProvenanceEvent};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::inbound::ProvenanceLogApi;
use shared_types::PropertyId;
use tracing::warn;

/// Lazy iterator over one property's events in ascending seq.
///
/// Bounded by the chain length when the iterator was created, so events
/// committed afterwards are not observed. Clone it (or call `history`
/// again) to restart from genesis.
#[derive(Clone)]
pub struct ProvenanceHistory<'a> {
    store: &'a dyn KeyValueStore,
    property: PropertyId,
    next_seq: u64,
    end: u64,
}

impl<'a> ProvenanceHistory<'a> {
    pub(crate) fn new(store: &'a dyn KeyValueStore, property: PropertyId, end: u64) -> Self {
        Self {
            store,
            property,
            next_seq: 0,
            end,
        }
    }

    pub fn property(&self) -> PropertyId {
        self.property
    }

    /// Number of events this iterator covers in total.
    pub fn chain_len(&self) -> u64 {
        self.end
    }
}

impl Iterator for ProvenanceHistory<'_> {
    type Item = Result<ProvenanceEvent, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_seq >= self.end {
            return None;
        }
        let seq = self.next_seq;
        self.next_seq += 1;

        let result = match self.store.get(&KeyPrefix::event_key(self.property, seq)) {
            Ok(Some(bytes)) => decode(&bytes),
            Ok(None) => Err(LedgerError::invariant(
                self.property,
                format!("provenance event {} missing", seq),
            )),
            Err(e) => Err(e.into()),
        };
        // a gap ends the iteration
        if result.is_err() {
            self.next_seq = self.end;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next_seq).unwrap_or(usize::MAX);
        (0, Some(remaining))
    }
}

impl<KV, TS, DR> ProvenanceLogApi for PropertyLedgerService<KV, TS, DR>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    fn history(&self, property: PropertyId) -> Result<ProvenanceHistory<'_>, LedgerError> {
        self.require_record(property)?;
        let end = self.load_head(property)?.map(|head| head.len()).unwrap_or(0);
        Ok(ProvenanceHistory::new(&self.store, property, end))
    }

    fn event(&self, property: PropertyId, seq: u64) -> Result<Option<ProvenanceEvent>, LedgerError> {
        match self.store.get(&KeyPrefix::event_key(property, seq))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn chain_head(&self, property: PropertyId) -> Result<Option<ChainHead>, LedgerError> {
        self.load_head(property)
    }

    fn verify_chain(&self, property: PropertyId) -> Result<bool, LedgerError> {
        let history = self.history(property)?;
        if history.chain_len() == 0 {
            warn!("[pc-03] {} has no provenance", property);
            return Ok(false);
        }

        let mut verifier = ChainVerifier::new(property);
        for item in history {
            let event = match item {
                Ok(event) => event,
                Err(e @ LedgerError::Storage { .. }) => return Err(e),
                Err(e) => {
                    warn!("[pc-03] chain of {} unreadable: {}", property, e);
                    return Ok(false);
                }
            };
            if !verifier.accept(&event) {
                warn!("[pc-03] chain of {} broken at seq {}", property, event.seq);
                return Ok(false);
            }
        }

        let stored_head = self.load_head(property)?;
        if verifier.head() != stored_head {
            warn!("[pc-03] chain head of {} does not match its events", property);
            return Ok(false);
        }
        if let Some(head) = stored_head {
            if self.store.exists(&KeyPrefix::event_key(property, head.seq + 1))? {
                warn!("[pc-03] {} has events beyond its chain head", property);
                return Ok(false);
            }
        }
        Ok(true)
    }
}
