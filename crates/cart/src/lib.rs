//! Shopping cart domain module.
//!
//! Business rules for the cart (composite-key line identity, derived totals) and
//! checkout pricing, implemented as deterministic domain logic (no IO, no storage).

pub mod cart;
pub mod checkout;
pub mod line;

pub use cart::{
    AddItem, Cart, CartCommand, CartEvent, LineAdded, LineRemoved, QuantityIncremented,
    QuantitySet, RemoveItem, UpdateQuantity,
};
pub use checkout::{
    AppliedDiscount, CheckoutError, CheckoutRequest, CheckoutSummary, DiscountPolicy,
    OrderReceipt, PaymentMethod, ShippingMethod,
};
pub use line::{LineItem, LineKey};
