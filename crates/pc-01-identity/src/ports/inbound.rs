//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::SignedRequest;
use crate::domain::errors::AuthError;
use shared_types::Address;

/// Turns a transport request into an authenticated principal.
///
/// Implementations must be fast and side-effect free: no retries, no
/// blocking I/O. Any failure is reported as an `AuthError`.
pub trait IdentityAdapter: Send + Sync {
    /// Verify the request and return the caller's address.
    fn authenticate(&self, request: &SignedRequest) -> Result<Address, AuthError>;
}
