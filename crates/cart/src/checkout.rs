//! Checkout pricing and the simulated order submission.
//!
//! There is no payment processing: placing an order only prices the cart, issues
//! a receipt and (in the store layer) clears the cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use giftshop_core::{DomainError, DomainResult, Money, OrderId};

use crate::cart::Cart;
use crate::line::LineItem;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("Código de descuento inválido")]
    InvalidDiscountCode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    #[default]
    #[serde(rename = "estandar")]
    Standard,
    #[serde(rename = "express")]
    Express,
}

impl ShippingMethod {
    pub fn cost(self) -> Money {
        match self {
            ShippingMethod::Standard => Money::ZERO,
            ShippingMethod::Express => Money::from_cents(995),
        }
    }
}

/// Recorded on the receipt only; nothing is charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "paypal")]
    PayPal,
}

/// Stored/configured shape of a [`DiscountPolicy`], validated on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DiscountPolicySpec {
    code: String,
    percent: u32,
}

/// The single discount code the storefront hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DiscountPolicySpec", into = "DiscountPolicySpec")]
pub struct DiscountPolicy {
    code: String,
    percent: u32,
}

impl DiscountPolicy {
    pub const DEFAULT_CODE: &'static str = "10PERAYLIMON";
    pub const DEFAULT_PERCENT: u32 = 10;

    pub fn new(code: impl Into<String>, percent: u32) -> DomainResult<Self> {
        let code = code.into().trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::validation("discount code cannot be empty"));
        }
        if !(1..=100).contains(&percent) {
            return Err(DomainError::validation(format!(
                "discount percent must be within 1..=100 (got {percent})"
            )));
        }
        Ok(Self { code, percent })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Redeem a code typed by the customer. Comparison ignores case.
    pub fn redeem(&self, input: &str) -> Result<AppliedDiscount, CheckoutError> {
        if input.trim().to_uppercase() != self.code {
            return Err(CheckoutError::InvalidDiscountCode);
        }
        Ok(AppliedDiscount {
            code: self.code.clone(),
            percent: self.percent,
        })
    }
}

impl TryFrom<DiscountPolicySpec> for DiscountPolicy {
    type Error = DomainError;

    fn try_from(spec: DiscountPolicySpec) -> Result<Self, Self::Error> {
        Self::new(spec.code, spec.percent)
    }
}

impl From<DiscountPolicy> for DiscountPolicySpec {
    fn from(policy: DiscountPolicy) -> Self {
        DiscountPolicySpec {
            code: policy.code,
            percent: policy.percent,
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            code: Self::DEFAULT_CODE.to_string(),
            percent: Self::DEFAULT_PERCENT,
        }
    }
}

/// A successfully redeemed discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub code: String,
    pub percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Money,
    pub discount: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CheckoutSummary {
    /// `total = subtotal - discount + shipping`; the discount never applies to shipping.
    pub fn compute(
        cart: &Cart,
        discount: Option<&AppliedDiscount>,
        shipping: ShippingMethod,
    ) -> Self {
        let subtotal = cart.total();
        let discount = discount.map_or(Money::ZERO, |d| subtotal.percent(d.percent));
        let shipping = shipping.cost();
        Self {
            subtotal,
            discount,
            shipping,
            total: subtotal.saturating_sub(discount) + shipping,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub shipping: ShippingMethod,
    pub payment: PaymentMethod,
    pub discount: Option<AppliedDiscount>,
}

/// Receipt for a simulated order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
    pub shipping: ShippingMethod,
    pub payment: PaymentMethod,
    pub discount: Option<AppliedDiscount>,
    pub summary: CheckoutSummary,
}

impl OrderReceipt {
    pub fn issue(
        cart: &Cart,
        request: &CheckoutRequest,
        placed_at: DateTime<Utc>,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            order_id: OrderId::new(),
            placed_at,
            lines: cart.items().to_vec(),
            shipping: request.shipping,
            payment: request.payment,
            discount: request.discount.clone(),
            summary: CheckoutSummary::compute(cart, request.discount.as_ref(), request.shipping),
        })
    }
}
