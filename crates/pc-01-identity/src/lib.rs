//! # Identity Adapter (PC-01)
//!
//! Wraps an external signer and yields authenticated principal addresses.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): request envelope and error types
//! - **Ports Layer** (`ports/`): the `IdentityAdapter` contract
//! - **Adapters Layer** (`adapters/`): Ed25519 verification and signing
//!
//! ## Security Notes
//!
//! - The ledger never parses signatures; it only consumes the `Address`
//!   returned by `IdentityAdapter::authenticate`.
//! - Signatures cover a domain-tagged digest of the body, so a signature
//!   produced for another protocol cannot be replayed here.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::ed25519::{address_from_public_key, Ed25519IdentityAdapter, RequestSigner};
pub use domain::entities::{signing_digest, SignedRequest, REQUEST_DOMAIN_TAG};
pub use domain::errors::AuthError;
pub use ports::inbound::IdentityAdapter;
