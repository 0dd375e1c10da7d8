//! # Integration Tests
//!
//! Flows across the identity adapter, document registry and property
//! ledger, driven through the public crate APIs only.

pub mod gateway;
pub mod properties;
pub mod scenarios;
