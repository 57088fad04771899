use std::collections::HashSet;

use giftshop_core::{DomainError, DomainResult, Entity};

use crate::curation::Curation;
use crate::product::{Category, Product};
use crate::query::{CatalogQuery, FilterCriteria, SortKey, sort_products};

/// The fixed product list plus its curation rules.
///
/// Immutable after construction, so it can be shared freely between readers.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    curation: Curation,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids or slugs.
    pub fn new(products: Vec<Product>, curation: Curation) -> DomainResult<Self> {
        let mut ids = HashSet::with_capacity(products.len());
        let mut slugs = HashSet::with_capacity(products.len());

        for product in &products {
            if !ids.insert(product.id()) {
                return Err(DomainError::invariant(format!(
                    "duplicate product id '{}'",
                    product.id()
                )));
            }
            if !slugs.insert(product.slug()) {
                return Err(DomainError::invariant(format!(
                    "duplicate product slug '{}'",
                    product.slug()
                )));
            }
        }

        Ok(Self { products, curation })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn curation(&self) -> &Curation {
        &self.curation
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug() == slug)
    }

    pub fn get_by_category(&self, category: Category) -> Vec<&Product> {
        self.products.iter().filter(|p| p.category() == category).collect()
    }

    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| self.curation.is_featured(p)).collect()
    }

    /// The first special product (insertion order) the curation accepts.
    pub fn special(&self) -> Option<&Product> {
        self.products.iter().find(|p| self.curation.is_special_candidate(p))
    }

    /// Case-insensitive substring search over name, description and category.
    ///
    /// An empty query returns the whole catalog. Results keep catalog order.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        if query.is_empty() {
            return self.products.iter().collect();
        }
        let needle = query.to_lowercase();
        self.products.iter().filter(|p| p.matches_text(&needle)).collect()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        self.products.iter().filter(|p| criteria.matches(p)).collect()
    }

    pub fn sort<'a>(&self, products: Vec<&'a Product>, key: SortKey) -> Vec<&'a Product> {
        sort_products(products, key)
    }

    /// Search narrows first, the filter narrows further, sort is applied last.
    pub fn browse(&self, query: &CatalogQuery) -> Vec<&Product> {
        let narrowed = self
            .search(&query.search)
            .into_iter()
            .filter(|p| query.filter.matches(p))
            .collect();
        sort_products(narrowed, query.sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Material, ProductSpec};
    use giftshop_core::Money;

    fn product(id: &str, slug: &str, cents: u64, category: Category) -> Product {
        Product::new(ProductSpec {
            id: id.to_string(),
            slug: slug.to_string(),
            name: format!("Pieza {id}"),
            price: Money::from_cents(cents),
            description: format!("Descripción de {slug}"),
            short_description: String::new(),
            category,
            materials: vec![Material::Handmade],
            sizes: None,
            images: vec![],
            tags: vec![],
            details: String::new(),
            care: String::new(),
            is_special: false,
            special_edition: None,
            stock: 1,
        })
        .unwrap()
    }

    fn special(id: &str, slug: &str) -> Product {
        let mut spec: ProductSpec = product(id, slug, 0, Category::Necklaces).into();
        spec.is_special = true;
        spec.special_edition = Some("Única".to_string());
        Product::new(spec).unwrap()
    }

    fn scenario() -> (Catalog, Product, Product) {
        let a = product("A", "collar-a", 1495, Category::Necklaces);
        let b = product("B", "pulsera-b", 1295, Category::Bracelets);
        let catalog = Catalog::new(vec![a.clone(), b.clone()], Curation::default()).unwrap();
        (catalog, a, b)
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(
            vec![
                product("1", "uno", 100, Category::Rings),
                product("1", "otro", 100, Category::Rings),
            ],
            Curation::default(),
        )
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("id") => {}
            e => panic!("Expected duplicate id error, got {e:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let err = Catalog::new(
            vec![
                product("1", "mismo", 100, Category::Rings),
                product("2", "mismo", 100, Category::Rings),
            ],
            Curation::default(),
        )
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("slug") => {}
            e => panic!("Expected duplicate slug error, got {e:?}"),
        }
    }

    #[test]
    fn get_by_slug_misses_are_none() {
        let (catalog, a, _) = scenario();
        assert_eq!(catalog.get_by_slug("collar-a"), Some(&a));
        assert_eq!(catalog.get_by_slug("no-existe"), None);
    }

    #[test]
    fn scenario_filter_and_sort() {
        let (catalog, a, b) = scenario();

        let collares = catalog.filter(&FilterCriteria::new().category(Category::Necklaces));
        assert_eq!(collares, vec![&a]);

        let sorted = catalog.sort(vec![&a, &b], SortKey::PriceAsc);
        assert_eq!(sorted, vec![&b, &a]);

        let sorted = catalog.sort(vec![&b, &a], SortKey::PriceDesc);
        assert_eq!(sorted, vec![&a, &b]);
    }

    #[test]
    fn popular_and_newest_keep_input_order() {
        let (catalog, a, b) = scenario();
        assert_eq!(catalog.sort(vec![&a, &b], SortKey::Popular), vec![&a, &b]);
        assert_eq!(catalog.sort(vec![&b, &a], SortKey::Newest), vec![&b, &a]);
    }

    #[test]
    fn price_sort_is_stable_for_ties() {
        let x = product("1", "x", 1000, Category::Rings);
        let y = product("2", "y", 500, Category::Rings);
        let z = product("3", "z", 1000, Category::Rings);
        let w = product("4", "w", 500, Category::Rings);

        let asc = sort_products(vec![&x, &y, &z, &w], SortKey::PriceAsc);
        assert_eq!(asc, vec![&y, &w, &x, &z]);

        let desc = sort_products(vec![&x, &y, &z, &w], SortKey::PriceDesc);
        assert_eq!(desc, vec![&x, &z, &y, &w]);
    }

    #[test]
    fn empty_search_returns_full_catalog_in_order() {
        let (catalog, a, b) = scenario();
        assert_eq!(catalog.search(""), vec![&a, &b]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_description_and_category() {
        let (catalog, a, b) = scenario();
        assert_eq!(catalog.search("PIEZA a"), vec![&a]);
        assert_eq!(catalog.search("descripción de pulsera"), vec![&b]);
        assert_eq!(catalog.search("COLLARES"), vec![&a]);
        assert!(catalog.search("zzz").is_empty());
    }

    #[test]
    fn filter_ands_all_present_fields() {
        let (catalog, a, b) = scenario();

        let none = FilterCriteria::new();
        assert_eq!(catalog.filter(&none), vec![&a, &b]);

        let cheap = FilterCriteria::new().max_price(Money::from_cents(1300));
        assert_eq!(catalog.filter(&cheap), vec![&b]);

        let bounded = FilterCriteria::new()
            .min_price(Money::from_cents(1295))
            .max_price(Money::from_cents(1495));
        assert_eq!(catalog.filter(&bounded), vec![&a, &b]);

        let contradictory = FilterCriteria::new()
            .category(Category::Bracelets)
            .min_price(Money::from_cents(1400));
        assert!(catalog.filter(&contradictory).is_empty());

        let silver = FilterCriteria::new().material(Material::Sterling925);
        assert!(catalog.filter(&silver).is_empty());
    }

    #[test]
    fn browse_searches_then_filters_then_sorts() {
        let c = product("C", "collar-c", 995, Category::Necklaces);
        let (_, a, b) = scenario();
        let catalog =
            Catalog::new(vec![a.clone(), b.clone(), c.clone()], Curation::default()).unwrap();

        let query = CatalogQuery {
            search: "pieza".to_string(),
            filter: FilterCriteria::new().category(Category::Necklaces),
            sort: SortKey::PriceAsc,
        };
        assert_eq!(catalog.browse(&query), vec![&c, &a]);
    }

    #[test]
    fn special_picks_first_flagged_product() {
        let first = special("s1", "especial-uno");
        let second = special("s2", "especial-dos");
        let plain = product("p", "normal", 100, Category::Rings);
        let catalog = Catalog::new(
            vec![plain, first.clone(), second.clone()],
            Curation::default(),
        )
        .unwrap();
        assert_eq!(catalog.special(), Some(&first));

        let skip_first = Curation::new(|_| true, |p| p.slug() != "especial-uno");
        let catalog = Catalog::new(vec![first, second.clone()], skip_first).unwrap();
        assert_eq!(catalog.special(), Some(&second));
    }

    #[test]
    fn special_is_none_without_flagged_products() {
        let (catalog, _, _) = scenario();
        assert_eq!(catalog.special(), None);
    }

    #[test]
    fn featured_follows_injected_rule() {
        let (_, a, b) = scenario();
        let curation = Curation::from_config(&crate::CurationConfig {
            featured_exclude_slugs: vec!["collar-a".to_string()],
            special_exclude_slugs: vec![],
        });
        let catalog = Catalog::new(vec![a, b.clone()], curation).unwrap();
        assert_eq!(catalog.featured(), vec![&b]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const CATEGORIES: [Category; 4] = [
            Category::Rings,
            Category::Necklaces,
            Category::Earrings,
            Category::Bracelets,
        ];

        fn arb_catalog() -> impl Strategy<Value = Catalog> {
            prop::collection::vec((0u64..5_000, 0usize..4, "[a-z]{1,6}"), 0..20).prop_map(
                |rows| {
                    let products = rows
                        .into_iter()
                        .enumerate()
                        .map(|(i, (cents, cat, word))| {
                            let mut spec: ProductSpec =
                                product(&i.to_string(), &format!("p-{i}"), cents, CATEGORIES[cat])
                                    .into();
                            spec.name = format!("{word} {i}");
                            Product::new(spec).unwrap()
                        })
                        .collect();
                    Catalog::new(products, Curation::default()).unwrap()
                },
            )
        }

        proptest! {
            /// Property: price-asc output is non-decreasing and stable for ties.
            #[test]
            fn price_asc_is_sorted_and_stable(catalog in arb_catalog()) {
                let input: Vec<&Product> = catalog.products().iter().collect();
                let sorted = sort_products(input.clone(), SortKey::PriceAsc);

                prop_assert_eq!(sorted.len(), input.len());
                for pair in sorted.windows(2) {
                    prop_assert!(pair[0].price() <= pair[1].price());
                    if pair[0].price() == pair[1].price() {
                        let i0 = input.iter().position(|p| std::ptr::eq(*p, pair[0])).unwrap();
                        let i1 = input.iter().position(|p| std::ptr::eq(*p, pair[1])).unwrap();
                        prop_assert!(i0 < i1);
                    }
                }
            }

            /// Property: search and filter commute; sort is terminal.
            #[test]
            fn search_and_filter_commute(
                catalog in arb_catalog(),
                q in "[a-z]{0,2}",
                cat in 0usize..4,
                max in 0u64..5_000,
            ) {
                let criteria = FilterCriteria::new()
                    .category(CATEGORIES[cat])
                    .max_price(Money::from_cents(max));

                let searched_then_filtered: Vec<&Product> = catalog
                    .search(&q)
                    .into_iter()
                    .filter(|p| criteria.matches(p))
                    .collect();
                let filtered = catalog.filter(&criteria);
                let intersection: Vec<&Product> = catalog
                    .search(&q)
                    .into_iter()
                    .filter(|p| filtered.contains(p))
                    .collect();

                prop_assert_eq!(
                    sort_products(searched_then_filtered, SortKey::PriceDesc),
                    sort_products(intersection, SortKey::PriceDesc)
                );

                let browsed = catalog.browse(&CatalogQuery {
                    search: q.clone(),
                    filter: criteria.clone(),
                    sort: SortKey::PriceAsc,
                });
                for p in &browsed {
                    prop_assert!(criteria.matches(p));
                }
            }
        }
    }
}
