//! Cart store: `Cart` transitions composed with slot persistence.

use chrono::Utc;

use giftshop_cart::{
    AddItem, AppliedDiscount, Cart, CartCommand, CheckoutError, CheckoutRequest, CheckoutSummary,
    DiscountPolicy, LineItem, LineKey, OrderReceipt, RemoveItem, ShippingMethod, UpdateQuantity,
};
use giftshop_catalog::{GIFT_CARD_MATERIAL, GiftCardValue, Product};
use giftshop_core::{DomainResult, Entity, Money, ProductId};

use crate::persisted::PersistedAggregate;
use crate::slot::{CART_SLOT, SLOT_VERSION};
use crate::storage::StateStorage;

/// The storefront cart, persisted to the `cart-storage` slot after every change.
#[derive(Debug)]
pub struct CartStore<S> {
    inner: PersistedAggregate<Cart, S>,
    discount: DiscountPolicy,
}

impl<S: StateStorage> CartStore<S> {
    pub fn open(storage: S, discount: DiscountPolicy) -> Self {
        Self {
            inner: PersistedAggregate::load(storage, CART_SLOT, SLOT_VERSION),
            discount,
        }
    }

    /// Merge into the line with the same `(product, material, size)` or append a new one.
    pub fn add_item(&mut self, product: &Product, material: &str, size: Option<&str>) {
        tracing::debug!(product_id = %product.id(), material, size, "add_item");
        let command = CartCommand::AddItem(AddItem {
            product: product.clone(),
            material: material.to_string(),
            size: size.map(str::to_string),
        });
        if let Err(err) = self.inner.execute(&command) {
            tracing::warn!(error = %err, "add_item rejected");
        }
    }

    /// Gift cards carry a placeholder material and no size.
    pub fn add_gift_card(&mut self, value: GiftCardValue) {
        self.add_item(&value.product(), GIFT_CARD_MATERIAL, None);
    }

    /// No-op when no line matches.
    pub fn remove_item(&mut self, product_id: &ProductId, material: &str, size: Option<&str>) {
        tracing::debug!(%product_id, material, size, "remove_item");
        let command = CartCommand::RemoveItem(RemoveItem {
            key: line_key(product_id, material, size),
        });
        if let Err(err) = self.inner.execute(&command) {
            tracing::warn!(error = %err, "remove_item rejected");
        }
    }

    /// `quantity <= 0` removes the line; a missing line is ignored.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        material: &str,
        quantity: i64,
        size: Option<&str>,
    ) -> DomainResult<()> {
        tracing::debug!(%product_id, material, size, quantity, "update_quantity");
        let command = CartCommand::UpdateQuantity(UpdateQuantity {
            key: line_key(product_id, material, size),
            quantity,
        });
        self.inner.execute(&command)?;
        Ok(())
    }

    pub fn clear_cart(&mut self) {
        tracing::debug!("clear_cart");
        if let Err(err) = self.inner.execute(&CartCommand::ClearCart) {
            tracing::warn!(error = %err, "clear_cart rejected");
        }
    }

    pub fn cart(&self) -> &Cart {
        self.inner.state()
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart().items()
    }

    pub fn total(&self) -> Money {
        self.cart().total()
    }

    pub fn item_count(&self) -> u64 {
        self.cart().item_count()
    }

    pub fn is_degraded(&self) -> bool {
        self.inner.is_degraded()
    }

    pub fn redeem_discount(&self, code: &str) -> Result<AppliedDiscount, CheckoutError> {
        let result = self.discount.redeem(code);
        if result.is_err() {
            tracing::info!("discount code rejected");
        }
        result
    }

    pub fn summary(
        &self,
        discount: Option<&AppliedDiscount>,
        shipping: ShippingMethod,
    ) -> CheckoutSummary {
        CheckoutSummary::compute(self.cart(), discount, shipping)
    }

    /// Simulated order placement: price the cart, issue a receipt, empty the cart.
    pub fn checkout(&mut self, request: &CheckoutRequest) -> Result<OrderReceipt, CheckoutError> {
        let receipt = OrderReceipt::issue(self.cart(), request, Utc::now())?;
        tracing::info!(
            order_id = %receipt.order_id,
            total = %receipt.summary.total,
            items = self.item_count(),
            "order placed"
        );
        self.clear_cart();
        Ok(receipt)
    }
}

fn line_key(product_id: &ProductId, material: &str, size: Option<&str>) -> LineKey {
    LineKey::new(product_id.clone(), material, size.map(str::to_string))
}
