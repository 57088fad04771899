use std::collections::HashMap;
use std::sync::RwLock;

use super::{StateStorage, StorageError};

/// In-memory slot storage for tests and storage-less sessions.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for InMemoryStorage {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn save(&self, slot: &str, contents: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn save_load_remove() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.load("cart-storage").unwrap(), None);

        storage.save("cart-storage", "{}").unwrap();
        assert_eq!(storage.load("cart-storage").unwrap().as_deref(), Some("{}"));

        storage.remove("cart-storage").unwrap();
        storage.remove("cart-storage").unwrap();
        assert_eq!(storage.load("cart-storage").unwrap(), None);
    }

    #[test]
    fn shared_handle_sees_same_slots() {
        let storage = Arc::new(InMemoryStorage::new());
        let other = Arc::clone(&storage);
        storage.save("access-storage", "1").unwrap();
        assert_eq!(other.load("access-storage").unwrap().as_deref(), Some("1"));
    }
}
