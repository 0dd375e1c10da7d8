//! # Domain Layer
//!
//! Request envelope and authentication errors. No cryptography lives here.

pub mod entities;
pub mod errors;
