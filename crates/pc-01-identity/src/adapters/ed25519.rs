//! # Ed25519 Identity Adapter
//!
//! Verifies Ed25519 signatures over the domain-tagged request digest.
//!
//! ## Address Derivation
//!
//! `address = SHA-256(public_key)[12..32]`, mirroring the "last 20 bytes of
//! the key hash" convention used by account-based chains.

use crate::domain::entities::{signing_digest, SignedRequest};
use crate::domain::errors::AuthError;
use crate::ports::inbound::IdentityAdapter;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use shared_types::{content_hash, Address};
use tracing::debug;

/// Derive the principal address for a public key.
pub fn address_from_public_key(public_key: &[u8; 32]) -> Address {
    Address::from_hash_tail(&content_hash(public_key))
}

/// Stateless verifier; cheap to clone and share.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519IdentityAdapter;

impl Ed25519IdentityAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityAdapter for Ed25519IdentityAdapter {
    fn authenticate(&self, request: &SignedRequest) -> Result<Address, AuthError> {
        if request.body.is_empty() {
            return Err(AuthError::EmptyBody);
        }

        let key =
            VerifyingKey::from_bytes(&request.public_key).map_err(|_| AuthError::InvalidPublicKey)?;
        let signature = Signature::from_bytes(&request.signature);
        let digest = signing_digest(&request.body);

        // verify_strict rejects small-order keys and malleable signatures
        key.verify_strict(&digest, &signature).map_err(|_| {
            debug!("[pc-01] rejected request: signature mismatch");
            AuthError::InvalidSignature
        })?;

        Ok(address_from_public_key(&request.public_key))
    }
}

/// Client-side helper that produces `SignedRequest`s.
pub struct RequestSigner {
    signing_key: SigningKey,
}

impl RequestSigner {
    /// Create from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Address the ledger will see for this signer.
    pub fn address(&self) -> Address {
        address_from_public_key(&self.public_key())
    }

    /// Sign an encoded command body.
    pub fn sign(&self, body: Vec<u8>) -> SignedRequest {
        let digest = signing_digest(&body);
        let signature = self.signing_key.sign(&digest);
        SignedRequest {
            public_key: self.public_key(),
            signature: signature.to_bytes(),
            body,
        }
    }
}
