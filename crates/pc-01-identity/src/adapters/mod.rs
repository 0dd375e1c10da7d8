//! # Adapters
//!
//! - `ed25519`: signature verification and a client-side signer

pub mod ed25519;
