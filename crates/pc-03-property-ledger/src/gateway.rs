//! # Ledger Gateway
//!
//! Authenticated entry point for signed commands.
//!
//! ## Security Boundary
//!
//! The acting principal is always the address returned by the
//! `IdentityAdapter`. Commands carry no `from` or `holder` field, so a
//! request can only move shares held by its own signer.
//!
//! ## Replay Protection
//!
//! Every signed body carries a per-signer nonce. A request is accepted
//! only if its nonce is above the last one applied for that signer. The
//! new nonce is written in the same batch as the mutation it authorizes.
//! Requests rejected by ledger rules still consume their nonce, so a
//! failed transfer cannot be resubmitted once the signer's balance allows it.

use crate::domain::errors::LedgerError;
use crate::domain::shares::Allocation;
use crate::ports::inbound::{PropertyRegistryApi, ShareLedgerApi};
use crate::ports::outbound::{DocumentSetResolver, KeyValueStore, TimeSource};
use crate::service::PropertyLedgerService;
use crate::shared::SharedLedger;
use pc_01_identity::{AuthError, IdentityAdapter, SignedRequest};
use serde::{Deserialize, Serialize};
use shared_types::{Address, DocumentSetId, Hash, PropertyId, ShareUnit};
use thiserror::Error;
use tracing::{debug, warn};

/// A ledger operation on behalf of the request's signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    Create {
        metadata_hash: Hash,
        document_set: DocumentSetId,
    },
    Transfer {
        property: PropertyId,
        to: Address,
        units: ShareUnit,
    },
    Split {
        property: PropertyId,
        allocations: Vec<Allocation>,
    },
    Merge {
        property: PropertyId,
    },
    Amend {
        property: PropertyId,
        metadata_hash: Hash,
        document_set: Option<DocumentSetId>,
    },
    Retire {
        property: PropertyId,
    },
}

impl LedgerCommand {
    fn name(&self) -> &'static str {
        match self {
            LedgerCommand::Create { .. } => "create",
            LedgerCommand::Transfer { .. } => "transfer",
            LedgerCommand::Split { .. } => "split",
            LedgerCommand::Merge { .. } => "merge",
            LedgerCommand::Amend { .. } => "amend",
            LedgerCommand::Retire { .. } => "retire",
        }
    }
}

/// Body of a `SignedRequest`, bincode-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// Must exceed the last nonce applied for the signer.
    pub nonce: u64,
    pub command: LedgerCommand,
}

impl CommandEnvelope {
    pub fn new(nonce: u64, command: LedgerCommand) -> Self {
        Self { nonce, command }
    }

    pub fn encode(&self) -> Result<Vec<u8>, GatewayError> {
        bincode::serialize(self).map_err(|e| GatewayError::MalformedCommand(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, GatewayError> {
        bincode::deserialize(bytes).map_err(|e| GatewayError::MalformedCommand(e.to_string()))
    }
}

/// Result of a successfully applied command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Created(PropertyId),
    Transferred,
    Split,
    Merged { balance: ShareUnit },
    Amended,
    Retired,
}

/// Gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    #[error("Replayed request from {signer}: nonce {nonce} not above {last}")]
    Replay {
        signer: Address,
        nonce: u64,
        last: u64,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Authenticates signed requests and dispatches them to the ledger.
pub struct LedgerGateway<I, KV, TS, DR>
where
    I: IdentityAdapter,
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    identity: I,
    ledger: SharedLedger<KV, TS, DR>,
}

impl<I, KV, TS, DR> LedgerGateway<I, KV, TS, DR>
where
    I: IdentityAdapter,
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    pub fn new(identity: I, ledger: SharedLedger<KV, TS, DR>) -> Self {
        Self { identity, ledger }
    }

    pub fn ledger(&self) -> &SharedLedger<KV, TS, DR> {
        &self.ledger
    }

    /// Nonce the signer should use for its next request.
    pub fn next_nonce(&self, signer: &Address) -> Result<u64, GatewayError> {
        let last = self.ledger.read(|ledger| ledger.last_nonce(signer))?;
        Ok(last.map_or(0, |last| last.saturating_add(1)))
    }

    /// Authenticate, decode and apply one request.
    pub fn submit(&self, request: &SignedRequest) -> Result<CommandOutcome, GatewayError> {
        // Step 1: Authenticate the signer
        let caller = self.identity.authenticate(request).map_err(|e| {
            warn!("[pc-03] rejected request: {}", e);
            e
        })?;

        // Step 2: Decode the envelope
        let CommandEnvelope { nonce, command } = CommandEnvelope::decode(&request.body)?;
        let name = command.name();
        debug!("[pc-03] {} submitted {} (nonce {})", caller, name, nonce);

        // Step 3: Check the nonce and apply under one write lock
        self.ledger.write(|ledger| -> Result<CommandOutcome, GatewayError> {
            if let Some(last) = ledger.last_nonce(&caller)? {
                if nonce <= last {
                    warn!("[pc-03] replayed {} from {} (nonce {} <= {})", name, caller, nonce, last);
                    return Err(GatewayError::Replay {
                        signer: caller,
                        nonce,
                        last,
                    });
                }
            }
            ledger.stage_nonce(&caller, nonce)?;

            match apply(ledger, caller, command) {
                Ok(outcome) => {
                    ledger.flush_carried()?;
                    Ok(outcome)
                }
                Err(e) if e.is_user_error() => {
                    warn!("[pc-03] {} by {} rejected: {}", name, caller, e);
                    ledger.flush_carried()?;
                    Err(GatewayError::Ledger(e))
                }
                Err(e) => {
                    ledger.discard_carried();
                    Err(GatewayError::Ledger(e))
                }
            }
        })
    }
}

fn apply<KV, TS, DR>(
    ledger: &mut PropertyLedgerService<KV, TS, DR>,
    caller: Address,
    command: LedgerCommand,
) -> Result<CommandOutcome, LedgerError>
where
    KV: KeyValueStore,
    TS: TimeSource,
    DR: DocumentSetResolver,
{
    match command {
        LedgerCommand::Create {
            metadata_hash,
            document_set,
        } => ledger
            .create(caller, metadata_hash, document_set)
            .map(CommandOutcome::Created),
        LedgerCommand::Transfer {
            property,
            to,
            units,
        } => ledger
            .transfer(property, caller, to, units)
            .map(|()| CommandOutcome::Transferred),
        LedgerCommand::Split {
            property,
            allocations,
        } => ledger
            .split(property, caller, &allocations)
            .map(|()| CommandOutcome::Split),
        LedgerCommand::Merge { property } => ledger
            .merge(property, caller)
            .map(|balance| CommandOutcome::Merged { balance }),
        LedgerCommand::Amend {
            property,
            metadata_hash,
            document_set,
        } => ledger
            .amend(property, caller, metadata_hash, document_set)
            .map(|()| CommandOutcome::Amended),
        LedgerCommand::Retire { property } => ledger
            .retire(property, caller)
            .map(|()| CommandOutcome::Retired),
    }
}
