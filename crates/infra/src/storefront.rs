//! Composition root: catalog plus the two persisted stores over one storage.

use std::sync::Arc;

use anyhow::Context;

use giftshop_access::AccessGate;
use giftshop_catalog::{Catalog, Curation, seed_catalog};
use giftshop_core::DomainResult;

use crate::access_store::AccessStore;
use crate::cart_store::CartStore;
use crate::config::StorefrontConfig;
use crate::storage::{FileStorage, InMemoryStorage, StateStorage};

/// Everything a UI needs, wired once per process (or per test).
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: CartStore<S>,
    access: AccessStore<S>,
}

impl<S: StateStorage + Clone> Storefront<S> {
    /// Wire the seed catalog and both stores onto `storage`.
    pub fn open(config: StorefrontConfig, storage: S) -> DomainResult<Self> {
        let catalog = seed_catalog(Curation::from_config(&config.curation))?;
        let cart = CartStore::open(storage.clone(), config.discount);
        let access = AccessStore::open(storage, AccessGate::new(config.access_key));
        Ok(Self {
            catalog,
            cart,
            access,
        })
    }
}

impl<S> Storefront<S> {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    pub fn access(&self) -> &AccessStore<S> {
        &self.access
    }

    pub fn access_mut(&mut self) -> &mut AccessStore<S> {
        &mut self.access
    }
}

impl Storefront<Arc<InMemoryStorage>> {
    /// Isolated storefront with nothing written to disk.
    pub fn in_memory(config: StorefrontConfig) -> DomainResult<Self> {
        Self::open(config, Arc::new(InMemoryStorage::new()))
    }
}

impl Storefront<FileStorage> {
    /// Process entry point: read the environment, install logging, open the
    /// state directory.
    pub fn bootstrap() -> anyhow::Result<Self> {
        let config = StorefrontConfig::from_env().context("failed to load storefront configuration")?;
        giftshop_observability::init(config.log_format);

        let storage = match &config.state_dir {
            Some(dir) => FileStorage::new(dir)
                .with_context(|| format!("failed to open state directory at {}", dir.display()))?,
            None => FileStorage::open_default().context("failed to open default state directory")?,
        };
        tracing::info!(state_dir = %storage.dir().display(), "storefront state directory ready");

        Self::open(config, storage).context("failed to build seed catalog")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftshop_catalog::MYSTERY_EXPERIENCE_SLUG;

    #[test]
    fn in_memory_storefront_is_wired() {
        let mut shop = Storefront::in_memory(StorefrontConfig::default()).unwrap();
        assert_eq!(shop.catalog().len(), 4);
        assert!(shop.catalog().special().is_none());
        assert!(shop.catalog().get_by_slug(MYSTERY_EXPERIENCE_SLUG).is_some());

        let first = shop.catalog().products()[0].clone();
        shop.cart_mut().add_item(&first, "hecho-a-mano", None);
        assert_eq!(shop.cart().item_count(), 1);

        shop.access_mut().unlock("natillas").unwrap();
        assert!(shop.access().check_access());
    }

    #[test]
    fn curation_comes_from_config() {
        let mut config = StorefrontConfig::default();
        config.curation.special_exclude_slugs.clear();
        config.curation.featured_exclude_slugs.clear();

        let shop = Storefront::in_memory(config).unwrap();
        assert_eq!(
            shop.catalog().special().map(|p| p.slug().as_str()),
            Some(MYSTERY_EXPERIENCE_SLUG)
        );
        assert_eq!(shop.catalog().featured().len(), 4);
    }

    #[test]
    fn stores_in_separate_storefronts_are_isolated() {
        let mut a = Storefront::in_memory(StorefrontConfig::default()).unwrap();
        let b = Storefront::in_memory(StorefrontConfig::default()).unwrap();
        a.access_mut().set_access(true);
        assert!(!b.access().check_access());
    }
}
