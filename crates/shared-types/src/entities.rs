//! # Core Identifiers
//!
//! Primitive types shared by the identity, document and ledger crates.
//!
//! ## Clusters
//!
//! - **Content**: `Hash`, `DocumentSetId`
//! - **Principals**: `Address`
//! - **Ledger**: `PropertyId`, `ShareUnit`, `LogicalTime`

use crate::errors::IdParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: CONTENT
// =============================================================================

/// A 32-byte SHA-256 hash.
pub type Hash = [u8; 32];

/// Content-derived identifier of a registered document set.
///
/// Two sets with the same members always share the same id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct DocumentSetId(pub Hash);

impl DocumentSetId {
    /// Raw bytes of the identifier.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for DocumentSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for DocumentSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentSetId(0x{}..)", hex::encode(&self.0[..4]))
    }
}

// =============================================================================
// CLUSTER B: PRINCIPALS
// =============================================================================

/// A 20-byte principal address.
///
/// Produced by the identity adapter from a verified public key; the ledger
/// never sees keys or signatures.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Width of an address in bytes.
    pub const LEN: usize = 20;

    /// Raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Build an address from the trailing 20 bytes of a hash.
    pub fn from_hash_tail(hash: &Hash) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| IdParseError::InvalidHex(e.to_string()))?;
        let array: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdParseError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }
}

// =============================================================================
// CLUSTER C: LEDGER
// =============================================================================

/// Integer slice of a property's fixed denominator.
pub type ShareUnit = u64;

/// Logical timestamp supplied by the host's clock port.
pub type LogicalTime = u64;

/// Opaque, never-reused identifier of a tokenized property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub u64);

impl PropertyId {
    /// The first id handed out by a fresh ledger.
    pub const FIRST: PropertyId = PropertyId(1);

    /// Numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Big-endian bytes, used as a sortable storage key component.
    pub fn to_key_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// The id allocated after this one.
    pub fn next(&self) -> PropertyId {
        PropertyId(self.0.saturating_add(1))
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}

impl FromStr for PropertyId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix('#').unwrap_or(s);
        raw.parse::<u64>()
            .map(PropertyId)
            .map_err(|_| IdParseError::InvalidPropertyId(s.to_string()))
    }
}
