//! # Ports Layer
//!
//! - `outbound.rs` - the blob store the registry depends on

pub mod outbound;
