//! Filter / sort / search inputs and the terminal sort.

use serde::{Deserialize, Serialize};

use giftshop_core::{DomainError, Money};

use crate::product::{Category, Material, Product};

/// Filter criteria. Absent fields are not applied; present fields are ANDed.
///
/// Price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub material: Option<Material>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn min_price(mut self, price: Money) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: Money) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| product.category() != c) {
            return false;
        }
        if self.material.is_some_and(|m| !product.has_material(m)) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price() < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price() > max) {
            return false;
        }
        true
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// No popularity data exists: keeps the input order.
    #[default]
    Popular,
    /// No publication date exists: keeps the input order.
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }
}

impl core::str::FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortKey::Popular),
            "newest" => Ok(SortKey::Newest),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            other => Err(DomainError::validation(format!("unknown sort key '{other}'"))),
        }
    }
}

/// Sort a product list. Price sorts are stable (ties keep their input order).
pub fn sort_products<'a>(mut products: Vec<&'a Product>, key: SortKey) -> Vec<&'a Product> {
    match key {
        SortKey::Popular | SortKey::Newest => {}
        SortKey::PriceAsc => products.sort_by_key(|p| p.price()),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price().cmp(&a.price())),
    }
    products
}

/// A full listing request as the shop page issues it: search, then filter, then sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub search: String,
    pub filter: FilterCriteria,
    pub sort: SortKey,
}
