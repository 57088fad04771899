//! Key/value storage for persisted slots.
//!
//! A slot is a named JSON document. Adapters only move strings; encoding and
//! versioning live in [`crate::slot`].

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::InMemoryStorage;

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("slot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Slot storage abstraction (`localStorage`-like).
pub trait StateStorage: Send + Sync {
    /// `Ok(None)` when the slot has never been written.
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, slot: &str, contents: &str) -> Result<(), StorageError>;
    /// Removing a missing slot is not an error.
    fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

impl<S> StateStorage for Arc<S>
where
    S: StateStorage + ?Sized,
{
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).load(slot)
    }

    fn save(&self, slot: &str, contents: &str) -> Result<(), StorageError> {
        (**self).save(slot, contents)
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        (**self).remove(slot)
    }
}
