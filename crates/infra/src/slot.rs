//! Persisted slot envelope: `{ "state": <state>, "version": <u32> }`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StorageError;

pub const CART_SLOT: &str = "cart-storage";
pub const ACCESS_SLOT: &str = "access-storage";

/// Schema version written into every slot this build produces.
pub const SLOT_VERSION: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Why a stored slot was not usable.
#[derive(Debug, Error)]
pub enum SlotDecodeError {
    #[error("slot version {found} does not match expected version {expected}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("slot could not be decoded: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn encode<T: Serialize>(state: &T, version: u32) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&Envelope { state, version })?)
}

/// Decode a slot, checking the version before touching the state payload.
pub fn decode<T: DeserializeOwned>(raw: &str, expected: u32) -> Result<T, SlotDecodeError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw)?;
    if envelope.version != expected {
        return Err(SlotDecodeError::VersionMismatch {
            expected,
            found: envelope.version,
        });
    }
    Ok(serde_json::from_value(envelope.state)?)
}
