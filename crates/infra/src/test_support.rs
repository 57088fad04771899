use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{StateStorage, StorageError};

/// Storage whose writes (and optionally reads) always fail.
#[derive(Debug, Default)]
pub(crate) struct FailingStorage {
    fail_reads: bool,
    save_attempts: AtomicUsize,
}

impl FailingStorage {
    pub(crate) fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub(crate) fn save_attempts(&self) -> usize {
        self.save_attempts.load(Ordering::SeqCst)
    }
}

impl StateStorage for FailingStorage {
    fn load(&self, _slot: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("read refused".to_string()));
        }
        Ok(None)
    }

    fn save(&self, _slot: &str, _contents: &str) -> Result<(), StorageError> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _slot: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("remove refused".to_string()))
    }
}
