use serde::{Deserialize, Serialize};

use giftshop_core::{DomainError, DomainResult, Entity, Money, ProductId, Slug};

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Wire/storage name (e.g. `"collares"`).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(DomainError::validation(format!(
                        "unknown {} '{}'",
                        stringify!($name).to_lowercase(),
                        other
                    ))),
                }
            }
        }
    };
}

wire_enum!(
    /// Product category (fixed set).
    Category {
        Rings => "anillos",
        Necklaces => "collares",
        Earrings => "pendientes",
        Bracelets => "pulseras",
        GiftCard => "gift-card",
    }
);

wire_enum!(
    /// Material a piece can be ordered in.
    Material {
        Sterling925 => "plata-925",
        GoldVermeil => "oro-vermeil",
        Handmade => "hecho-a-mano",
    }
);

wire_enum!(
    /// Marketing tag. Never affects business logic.
    Tag {
        New => "nuevo",
        Bestseller => "bestseller",
        Gift => "regalo",
        Special => "especial",
        Mystery => "misterio",
    }
);

/// Unvalidated product record: the shape seed data is written in and the JSON
/// shape product snapshots are persisted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    pub category: Category,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub care: String,
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub is_special: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_edition: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

/// A catalog product.
///
/// Always valid: construction (and deserialization) goes through
/// [`Product::new`]. `stock` is informational and never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductSpec", into = "ProductSpec")]
pub struct Product {
    id: ProductId,
    slug: Slug,
    name: String,
    price: Money,
    description: String,
    short_description: String,
    category: Category,
    materials: Vec<Material>,
    sizes: Option<Vec<String>>,
    images: Vec<String>,
    tags: Vec<Tag>,
    details: String,
    care: String,
    special_edition: Option<String>,
    stock: u32,
}

impl Product {
    /// Upper bound on a unit price, in whole euros. Keeps every cart total well
    /// inside the decimal range even at `u32::MAX` units per line.
    pub const MAX_PRICE_UNITS: u32 = 1_000_000;

    pub fn new(spec: ProductSpec) -> DomainResult<Self> {
        let id = ProductId::parse(spec.id)?;
        let slug = Slug::parse(spec.slug)?;

        if spec.price > Money::from_units(Self::MAX_PRICE_UNITS) {
            return Err(DomainError::validation(format!(
                "product {id}: price {} exceeds the maximum of {} units",
                spec.price.amount(),
                Self::MAX_PRICE_UNITS
            )));
        }

        if spec.name.trim().is_empty() {
            return Err(DomainError::validation(format!("product {id}: name cannot be empty")));
        }

        if spec.materials.is_empty() && spec.category != Category::GiftCard {
            return Err(DomainError::validation(format!(
                "product {id}: at least one material is required"
            )));
        }

        let special_edition = match (spec.is_special, spec.special_edition) {
            (true, Some(label)) if !label.trim().is_empty() => Some(label),
            (false, None) => None,
            (true, _) => {
                return Err(DomainError::invariant(format!(
                    "product {id}: special products need a special edition label"
                )));
            }
            (false, Some(_)) => {
                return Err(DomainError::invariant(format!(
                    "product {id}: special edition label on a non-special product"
                )));
            }
        };

        // An empty size list means "no size dimension".
        let sizes = spec.sizes.filter(|s| !s.is_empty());

        Ok(Self {
            id,
            slug,
            name: spec.name,
            price: spec.price,
            description: spec.description,
            short_description: spec.short_description,
            category: spec.category,
            materials: dedup(spec.materials),
            sizes,
            images: spec.images,
            tags: dedup(spec.tags),
            details: spec.details,
            care: spec.care,
            special_edition,
            stock: spec.stock,
        })
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn sizes(&self) -> Option<&[String]> {
        self.sizes.as_deref()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn care(&self) -> &str {
        &self.care
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn is_special(&self) -> bool {
        self.special_edition.is_some()
    }

    pub fn special_edition(&self) -> Option<&str> {
        self.special_edition.as_deref()
    }

    pub fn is_gift_card(&self) -> bool {
        self.category == Category::GiftCard
    }

    pub fn has_material(&self, material: Material) -> bool {
        self.materials.contains(&material)
    }

    /// Size pre-selected on the product page: the third size when there are at
    /// least three, otherwise the first.
    pub fn default_size(&self) -> Option<&str> {
        let sizes = self.sizes.as_ref()?;
        sizes.get(2).or_else(|| sizes.first()).map(String::as_str)
    }

    /// Case-insensitive substring match on name, description and category.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.as_str().contains(needle)
    }
}

fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<ProductSpec> for Product {
    type Error = DomainError;

    fn try_from(spec: ProductSpec) -> Result<Self, Self::Error> {
        Product::new(spec)
    }
}

impl From<Product> for ProductSpec {
    fn from(p: Product) -> Self {
        ProductSpec {
            id: p.id.into(),
            slug: p.slug.into(),
            name: p.name,
            price: p.price,
            description: p.description,
            short_description: p.short_description,
            category: p.category,
            materials: p.materials,
            sizes: p.sizes,
            images: p.images,
            tags: p.tags,
            details: p.details,
            care: p.care,
            is_special: p.special_edition.is_some(),
            special_edition: p.special_edition,
            stock: p.stock,
        }
    }
}
