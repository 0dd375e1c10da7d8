//! # Parcel-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Ledger builders, principals, tracing setup
//! └── integration/      # Cross-crate flows
//!     ├── scenarios.rs  # Reference ownership scenarios
//!     ├── gateway.rs    # Signed commands through the identity adapter
//!     └── properties.rs # Property-based conservation and chain checks
//!
//! tests/benches/
//! └── ledger_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pc-tests
//!
//! # By category
//! cargo test -p pc-tests integration::scenarios
//! cargo test -p pc-tests integration::properties
//!
//! # With ledger logs
//! RUST_LOG=debug cargo test -p pc-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p pc-tests
//! ```

pub mod fixtures;
pub mod integration;
