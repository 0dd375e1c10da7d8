//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! - `memory_kv`: ordered in-memory key-value store
//! - `clock`: logical and wall-clock time sources
//! - `codec`: bincode encoding of stored records
//! - `documents`: document registry lookup

pub mod clock;
pub mod codec;
pub mod documents;
pub mod memory_kv;

pub use clock::{LogicalClock, SystemTimeSource};
pub use memory_kv::InMemoryKVStore;
