//! # Ports Layer
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (registry, share ledger, provenance APIs)
//! - `outbound.rs` - Driven ports (key-value store, clock, document lookup)

pub mod inbound;
pub mod outbound;
