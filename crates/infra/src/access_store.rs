//! Access store: passphrase check plus the persisted `hasAccess` flag.

use giftshop_access::{AccessCommand, AccessError, AccessGate, AccessState, SetAccess};

use crate::persisted::PersistedAggregate;
use crate::slot::{ACCESS_SLOT, SLOT_VERSION};
use crate::storage::StateStorage;

#[derive(Debug)]
pub struct AccessStore<S> {
    inner: PersistedAggregate<AccessState, S>,
    gate: AccessGate,
}

impl<S: StateStorage> AccessStore<S> {
    pub fn open(storage: S, gate: AccessGate) -> Self {
        Self {
            inner: PersistedAggregate::load(storage, ACCESS_SLOT, SLOT_VERSION),
            gate,
        }
    }

    /// Exact, case-sensitive comparison against the configured passphrase.
    pub fn validate_key(&self, candidate: &str) -> bool {
        self.gate.validate_key(candidate)
    }

    pub fn set_access(&mut self, granted: bool) {
        tracing::debug!(granted, "set_access");
        let command = AccessCommand::SetAccess(SetAccess { granted });
        if let Err(err) = self.inner.execute(&command) {
            tracing::warn!(error = %err, "set_access rejected");
        }
    }

    pub fn check_access(&self) -> bool {
        self.inner.state().has_access()
    }

    /// Validate `candidate` and grant access on a match.
    ///
    /// A wrong key leaves the flag untouched. Attempts are never throttled.
    pub fn unlock(&mut self, candidate: &str) -> Result<(), AccessError> {
        if let Err(err) = self.gate.check(candidate) {
            tracing::info!("access rejected");
            return Err(err);
        }
        tracing::info!("access granted");
        self.set_access(true);
        Ok(())
    }

    pub fn is_degraded(&self) -> bool {
        self.inner.is_degraded()
    }
}
