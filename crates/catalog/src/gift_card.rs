//! Gift cards: products synthesized on demand rather than listed in the catalog.

use serde::{Deserialize, Serialize};

use giftshop_core::{DomainError, Money};

use crate::product::{Category, Product, ProductSpec, Tag};

/// Material placeholder recorded on gift-card cart lines (they have no material).
pub const GIFT_CARD_MATERIAL: &str = "gift-card";

/// Face values a gift card can be bought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum GiftCardValue {
    Fifty,
    OneHundred,
    OneHundredFifty,
}

impl GiftCardValue {
    pub const ALL: [GiftCardValue; 3] = [
        GiftCardValue::Fifty,
        GiftCardValue::OneHundred,
        GiftCardValue::OneHundredFifty,
    ];

    pub fn units(self) -> u32 {
        match self {
            GiftCardValue::Fifty => 50,
            GiftCardValue::OneHundred => 100,
            GiftCardValue::OneHundredFifty => 150,
        }
    }

    /// Build the product snapshot that goes into the cart.
    pub fn product(self) -> Product {
        let units = self.units();
        let spec = ProductSpec {
            id: format!("gift-card-{units}"),
            slug: format!("gift-card-{units}"),
            name: format!("Gift Card {units}€"),
            price: Money::from_units(units),
            description: format!("Tarjeta de regalo de {units}€ para Pera y Limón"),
            short_description: "Tarjeta de regalo".to_string(),
            category: Category::GiftCard,
            materials: Vec::new(),
            sizes: None,
            images: Vec::new(),
            tags: vec![Tag::Gift],
            details: "Esta tarjeta de regalo no tiene fecha de caducidad".to_string(),
            care: "La tarjeta se enviará por correo electrónico".to_string(),
            is_special: false,
            special_edition: None,
            stock: 999,
        };

        match Product::new(spec) {
            Ok(product) => product,
            // The spec above is fixed and satisfies every product invariant.
            Err(e) => unreachable!("gift card product is always valid: {e}"),
        }
    }
}

impl TryFrom<u32> for GiftCardValue {
    type Error = DomainError;

    fn try_from(units: u32) -> Result<Self, Self::Error> {
        GiftCardValue::ALL
            .into_iter()
            .find(|v| v.units() == units)
            .ok_or_else(|| DomainError::validation(format!("no {units}€ gift card")))
    }
}

impl From<GiftCardValue> for u32 {
    fn from(value: GiftCardValue) -> Self {
        value.units()
    }
}
