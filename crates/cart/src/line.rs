use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use giftshop_catalog::Product;
use giftshop_core::{Entity, Money, ProductId, ValueObject};

/// Line identity: `(product id, selected material, selected size)`.
///
/// Two additions with the same key merge into one line; any differing component
/// makes a separate line, even for the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub material: String,
    pub size: Option<String>,
}

impl ValueObject for LineKey {}

impl LineKey {
    pub fn new(product_id: ProductId, material: impl Into<String>, size: Option<String>) -> Self {
        Self {
            product_id,
            material: material.into(),
            size,
        }
    }
}

/// One (product, material, size) combination with a quantity.
///
/// The product is a snapshot taken when the line was created: later catalog
/// changes never alter what is already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    product: Product,
    quantity: NonZeroU32,
    selected_material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_size: Option<String>,
}

impl LineItem {
    pub(crate) fn new(product: Product, material: String, size: Option<String>) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
            selected_material: material,
            selected_size: size,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn selected_material(&self) -> &str {
        &self.selected_material
    }

    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product.id().clone(),
            self.selected_material.clone(),
            self.selected_size.clone(),
        )
    }

    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id() == &key.product_id
            && self.selected_material == key.material
            && self.selected_size == key.size
    }

    /// `price × quantity`.
    pub fn subtotal(&self) -> Money {
        self.product.price().times(self.quantity.get())
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}
