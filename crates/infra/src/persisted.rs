//! Aggregate + slot persistence.

use serde::Serialize;
use serde::de::DeserializeOwned;

use giftshop_core::{Aggregate, Event};

use crate::slot::{self, SlotDecodeError};
use crate::storage::{StateStorage, StorageError};

/// An aggregate whose state is written to a storage slot after every mutation.
///
/// Persistence failures never fail the mutation: the first one is logged, the
/// store turns degraded and continues in memory only for the rest of the session.
#[derive(Debug)]
pub struct PersistedAggregate<A, S> {
    state: A,
    storage: S,
    slot: &'static str,
    version: u32,
    degraded: bool,
}

impl<A, S> PersistedAggregate<A, S>
where
    A: Aggregate + Default + Serialize + DeserializeOwned,
    A::Event: Event,
    S: StateStorage,
{
    /// Rehydrate from `slot`, or start from the default state.
    ///
    /// An unusable slot (wrong version, undecodable) is discarded with a warning.
    /// A storage read failure degrades the store so the unread slot is never
    /// overwritten.
    pub fn load(storage: S, slot: &'static str, version: u32) -> Self {
        let mut store = Self {
            state: A::default(),
            storage,
            slot,
            version,
            degraded: false,
        };

        match store.storage.load(slot) {
            Ok(Some(raw)) => match slot::decode::<A>(&raw, version) {
                Ok(state) => {
                    tracing::debug!(slot, "slot restored");
                    store.state = state;
                }
                Err(SlotDecodeError::VersionMismatch { expected, found }) => {
                    tracing::warn!(slot, expected, found, "discarding slot with unexpected version");
                }
                Err(err) => {
                    tracing::warn!(slot, error = %err, "discarding undecodable slot");
                }
            },
            Ok(None) => {}
            Err(err) => store.degrade(&err),
        }

        store
    }

    pub fn state(&self) -> &A {
        &self.state
    }

    pub fn slot(&self) -> &'static str {
        self.slot
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Handle + apply, then persist if anything changed.
    pub fn execute(&mut self, command: &A::Command) -> Result<Vec<A::Event>, A::Error> {
        let events = self.state.execute(command)?;
        for event in &events {
            tracing::debug!(slot = self.slot, event_type = event.event_type(), "applied");
        }
        if !events.is_empty() {
            self.persist();
        }
        Ok(events)
    }

    fn persist(&mut self) {
        if self.degraded {
            return;
        }
        let result =
            slot::encode(&self.state, self.version).and_then(|raw| self.storage.save(self.slot, &raw));
        if let Err(err) = result {
            self.degrade(&err);
        }
    }

    fn degrade(&mut self, err: &StorageError) {
        tracing::error!(
            slot = self.slot,
            error = %err,
            "persistence failed; continuing in memory only"
        );
        self.degraded = true;
    }
}
