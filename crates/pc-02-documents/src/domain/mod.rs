//! # Domain Layer
//!
//! - `entities` - `DocumentSet` and id derivation
//! - `config` - registry limits
//! - `errors` - `DocumentError`

pub mod config;
pub mod entities;
pub mod errors;
