//! Infrastructure layer: slot storage, persisted stores, config and wiring.

pub mod access_store;
pub mod cart_store;
pub mod config;
pub mod persisted;
pub mod slot;
pub mod storage;
pub mod storefront;

#[cfg(test)]
mod test_support;

pub use access_store::AccessStore;
pub use cart_store::CartStore;
pub use config::{ConfigError, StorefrontConfig};
pub use persisted::PersistedAggregate;
pub use slot::{ACCESS_SLOT, CART_SLOT, SLOT_VERSION};
pub use storage::{FileStorage, InMemoryStorage, StateStorage, StorageError};
pub use storefront::Storefront;
