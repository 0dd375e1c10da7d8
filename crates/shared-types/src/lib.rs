//! # Shared Types Crate
//!
//! Primitive identifiers and hashing helpers used across Parcel-Chain.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Hash`, `Address`, `PropertyId` and
//!   `DocumentSetId` are defined here and nowhere else.
//! - **Content Addressing**: every hash in the system is SHA-256, produced by
//!   the helpers in [`hashing`].
//! - **No Domain Logic**: ownership rules live in `pc-03-property-ledger`.

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use hashing::*;
