//! Curation rules for the "featured" list and the "special" highlight.
//!
//! Which products are featured (and which special product is highlighted) differs
//! between storefront setups, so the rules are injected into the [`Catalog`] rather
//! than compared against slugs inside the queries.
//!
//! [`Catalog`]: crate::Catalog

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Shared product predicate.
pub type ProductPredicate = Arc<dyn Fn(&Product) -> bool + Send + Sync>;

/// Serializable curation settings (config files / environment).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    /// Slugs never shown in the featured list.
    pub featured_exclude_slugs: Vec<String>,
    /// Slugs never returned as the special product, even when flagged special.
    pub special_exclude_slugs: Vec<String>,
}

/// Injected curation predicates.
#[derive(Clone)]
pub struct Curation {
    featured: ProductPredicate,
    special: ProductPredicate,
}

impl Curation {
    /// Custom predicates. `special` is only consulted for products flagged special.
    pub fn new(
        featured: impl Fn(&Product) -> bool + Send + Sync + 'static,
        special: impl Fn(&Product) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            featured: Arc::new(featured),
            special: Arc::new(special),
        }
    }

    pub fn from_config(config: &CurationConfig) -> Self {
        let featured_excluded = config.featured_exclude_slugs.clone();
        let special_excluded = config.special_exclude_slugs.clone();
        Self::new(
            move |p| !featured_excluded.iter().any(|s| p.slug() == s.as_str()),
            move |p| !special_excluded.iter().any(|s| p.slug() == s.as_str()),
        )
    }

    pub fn is_featured(&self, product: &Product) -> bool {
        (self.featured)(product)
    }

    pub fn is_special_candidate(&self, product: &Product) -> bool {
        product.is_special() && (self.special)(product)
    }
}

/// Everything featured; any product flagged special is a special candidate.
impl Default for Curation {
    fn default() -> Self {
        Self::new(|_| true, |_| true)
    }
}

impl core::fmt::Debug for Curation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Curation").finish_non_exhaustive()
    }
}
