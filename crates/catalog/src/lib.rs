//! Catalog domain module.
//!
//! The product list is seed data: built once, validated, never mutated. Every query
//! here is a pure function over that list (no IO, no storage).

pub mod catalog;
pub mod curation;
pub mod gift_card;
pub mod product;
pub mod query;
pub mod seed;

pub use catalog::Catalog;
pub use curation::{Curation, CurationConfig, ProductPredicate};
pub use gift_card::{GIFT_CARD_MATERIAL, GiftCardValue};
pub use product::{Category, Material, Product, ProductSpec, Tag};
pub use query::{CatalogQuery, FilterCriteria, SortKey, sort_products};
pub use seed::{MYSTERY_EXPERIENCE_SLUG, seed_catalog, seed_products, storefront_curation};
