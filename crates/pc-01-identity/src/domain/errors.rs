//! # Authentication Errors

use thiserror::Error;

/// Reasons a request could not be turned into a verified address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The public key bytes are not a valid curve point.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// The signature does not verify against the key and body.
    #[error("Signature verification failed")]
    InvalidSignature,

    /// Nothing to authenticate.
    #[error("Request body is empty")]
    EmptyBody,
}
