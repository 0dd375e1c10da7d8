//! Bincode encoding for records kept in the key-value store.

use crate::domain::errors::LedgerError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::ShareUnit;

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    Ok(bincode::serialize(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LedgerError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Balances are stored as raw big-endian integers.
pub fn encode_units(units: ShareUnit) -> Vec<u8> {
    units.to_be_bytes().to_vec()
}

pub fn decode_units(bytes: &[u8]) -> Result<ShareUnit, LedgerError> {
    let array: [u8; 8] = bytes.try_into().map_err(|_| LedgerError::Serialization {
        message: format!("balance must be 8 bytes, got {}", bytes.len()),
    })?;
    Ok(ShareUnit::from_be_bytes(array))
}
