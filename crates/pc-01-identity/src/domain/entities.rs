//! # Domain Entities
//!
//! The signed request envelope consumed by identity adapters.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{tagged_hash, Hash};

/// Domain-separation tag mixed into every signing digest.
pub const REQUEST_DOMAIN_TAG: &[u8] = b"parcel-chain/request/v1";

/// A request as it arrives from the transport layer.
///
/// `body` is opaque to the identity adapter; the gateway decodes it after
/// authentication succeeds.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest {
    /// Signer's Ed25519 public key.
    pub public_key: [u8; 32],
    /// Signature over `signing_digest(body)`.
    #[serde_as(as = "Bytes")]
    pub signature: [u8; 64],
    /// Encoded command.
    pub body: Vec<u8>,
}

/// Digest that signers sign and adapters verify.
pub fn signing_digest(body: &[u8]) -> Hash {
    tagged_hash(REQUEST_DOMAIN_TAG, &[body])
}
