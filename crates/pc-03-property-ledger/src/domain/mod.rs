//! # Domain Layer
//!
//! Pure domain logic for the property ledger. Nothing here performs I/O.
//!
//! ## Modules
//!
//! - `property` - PropertyRecord, status, dedup entries, statistics
//! - `shares` - ownership partition arithmetic and conservation checks
//! - `provenance` - hash-chained events and the chain verifier
//! - `value_objects` - storage key layout
//! - `config` - LedgerConfig and policies
//! - `errors` - LedgerError taxonomy

pub mod config;
pub mod errors;
pub mod property;
pub mod provenance;
pub mod shares;
pub mod value_objects;
