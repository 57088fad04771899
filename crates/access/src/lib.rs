//! `giftshop-access` — the shared-passphrase gate in front of the gift reveal.
//!
//! One secret, one persisted flag. This is a friction device for a small
//! audience, not authentication: there are no users, sessions or lockouts.

pub mod gate;
pub mod state;

pub use gate::{AccessError, AccessGate};
pub use state::{AccessCommand, AccessEvent, AccessSet, AccessState, SetAccess};
