//! # Domain Errors
//!
//! Error types for the fractional-ownership ledger.
//!
//! ## Design Principles
//!
//! - Every public operation commits fully or returns exactly one error
//! - User errors are caller-correctable; invariant violations are bugs
//! - The core never formats user-facing text beyond `Display`

use shared_types::{Address, DocumentSetId, PropertyId, ShareUnit};
use thiserror::Error;

/// Broad classification of a `LedgerError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input or unauthorized caller; state is unchanged.
    User,
    /// Conservation or hash-chain breakage; indicates a logic defect.
    Invariant,
    /// Storage or encoding failure below the domain.
    Infrastructure,
}

/// Errors returned by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No property with this id exists.
    #[error("Property not found: {property}")]
    NotFound { property: PropertyId },

    /// Holder balance is below the requested amount.
    #[error("Insufficient shares in {property}: {holder} holds {available}, requested {requested}")]
    InsufficientShares {
        property: PropertyId,
        holder: Address,
        available: ShareUnit,
        requested: ShareUnit,
    },

    /// Zero amounts and empty allocation lists are rejected.
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: &'static str },

    /// Sum of split allocations exceeds the holder's balance.
    #[error("Split exceeds balance in {property}: {holder} holds {available}, allocations total {requested}")]
    SplitExceedsBalance {
        property: PropertyId,
        holder: Address,
        available: ShareUnit,
        requested: u128,
    },

    /// Caller may not perform this action.
    #[error("Unauthorized: {caller} may not {action} {property}")]
    Unauthorized {
        property: PropertyId,
        caller: Address,
        action: &'static str,
    },

    /// Creator already registered this metadata hash within the dedup window.
    #[error("Duplicate metadata: already registered as {existing}")]
    DuplicateMetadata { existing: PropertyId },

    /// Referenced document set is not registered.
    #[error("Invalid document reference: {document_set}")]
    InvalidDocumentRef { document_set: DocumentSetId },

    /// Property is retired and read-only.
    #[error("Property retired: {property}")]
    PropertyRetired { property: PropertyId },

    /// Sender and recipient are the same principal.
    #[error("Self transfer in {property} by {holder}")]
    SelfTransfer {
        property: PropertyId,
        holder: Address,
    },

    /// Split has more legs than the configured maximum.
    #[error("Too many allocations: {count}, max {max}")]
    TooManyAllocations { count: usize, max: usize },

    /// Conservation or chain invariant broken. Never corrected silently.
    #[error("Invariant violation in {property}: {detail}")]
    InvariantViolation { property: PropertyId, detail: String },

    /// Underlying key-value store failed.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Stored bytes could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl LedgerError {
    /// Classify the error for callers translating it into responses.
    pub fn class(&self) -> ErrorClass {
        match self {
            LedgerError::InvariantViolation { .. } => ErrorClass::Invariant,
            LedgerError::Storage { .. } | LedgerError::Serialization { .. } => {
                ErrorClass::Infrastructure
            }
            _ => ErrorClass::User,
        }
    }

    pub fn is_user_error(&self) -> bool {
        self.class() == ErrorClass::User
    }

    pub(crate) fn invariant(property: PropertyId, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::error!("[pc-03] INVARIANT VIOLATION in {}: {}", property, detail);
        LedgerError::InvariantViolation { property, detail }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<KVStoreError> for LedgerError {
    fn from(err: KVStoreError) -> Self {
        LedgerError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<bincode::Error> for LedgerError {
    fn from(err: bincode::Error) -> Self {
        LedgerError::Serialization {
            message: err.to_string(),
        }
    }
}
