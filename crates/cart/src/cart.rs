use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use giftshop_catalog::Product;
use giftshop_core::{Aggregate, DomainError, Entity, Event, Money};

use crate::line::{LineItem, LineKey};

/// Persisted cart shape: `{ "items": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<LineItem>,
}

/// Aggregate: the shopping cart.
///
/// Items keep insertion order (display order). Totals are derived on every call,
/// never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartSnapshot", into = "CartSnapshot")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from stored line items, rejecting duplicate line keys.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            let key = item.key();
            if !seen.insert(key.clone()) {
                return Err(DomainError::invariant(format!(
                    "duplicate cart line for product '{}' ({}, {:?})",
                    key.product_id, key.material, key.size
                )));
            }
        }
        let cart = Self { items };
        if cart.checked_total().is_none() {
            return Err(DomainError::invariant("cart total exceeds the representable range"));
        }
        Ok(cart)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    fn checked_total(&self) -> Option<Money> {
        self.items.iter().try_fold(Money::ZERO, |acc, item| {
            acc.checked_add(item.product().price().checked_times(item.quantity())?)
        })
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.items.iter().position(|i| i.matches(key))
    }
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = DomainError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        Cart::from_items(snapshot.items)
    }
}

impl From<Cart> for CartSnapshot {
    fn from(cart: Cart) -> Self {
        CartSnapshot { items: cart.items }
    }
}

/// Command: AddItem. Merges into an existing line or appends a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub product: Product,
    pub material: String,
    pub size: Option<String>,
}

/// Command: RemoveItem. No-op when the key is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItem {
    pub key: LineKey,
}

/// Command: UpdateQuantity. Absolute set; `quantity <= 0` removes the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuantity {
    pub key: LineKey,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    UpdateQuantity(UpdateQuantity),
    ClearCart,
}

/// Event: LineAdded (new line with quantity 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub product: Product,
    pub material: String,
    pub size: Option<String>,
}

/// Event: QuantityIncremented (+1 on an existing line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityIncremented {
    pub key: LineKey,
}

/// Event: QuantitySet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySet {
    pub key: LineKey,
    pub quantity: NonZeroU32,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub key: LineKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    LineAdded(LineAdded),
    QuantityIncremented(QuantityIncremented),
    QuantitySet(QuantitySet),
    LineRemoved(LineRemoved),
    CartCleared,
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "cart.line.added",
            CartEvent::QuantityIncremented(_) => "cart.line.incremented",
            CartEvent::QuantitySet(_) => "cart.line.quantity_set",
            CartEvent::LineRemoved(_) => "cart.line.removed",
            CartEvent::CartCleared => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineAdded(e) => {
                self.items.push(LineItem::new(
                    e.product.clone(),
                    e.material.clone(),
                    e.size.clone(),
                ));
            }
            CartEvent::QuantityIncremented(e) => {
                if let Some(line) = self.items.iter_mut().find(|i| i.matches(&e.key)) {
                    line.increment();
                }
            }
            CartEvent::QuantitySet(e) => {
                if let Some(line) = self.items.iter_mut().find(|i| i.matches(&e.key)) {
                    line.set_quantity(e.quantity);
                }
            }
            CartEvent::LineRemoved(e) => {
                self.items.retain(|i| !i.matches(&e.key));
            }
            CartEvent::CartCleared => {
                self.items.clear();
            }
        }
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => Ok(self.handle_add(cmd)),
            CartCommand::RemoveItem(cmd) => Ok(self.handle_remove(&cmd.key)),
            CartCommand::UpdateQuantity(cmd) => self.handle_update_quantity(cmd),
            CartCommand::ClearCart => Ok(self.handle_clear()),
        }
    }
}

impl Cart {
    fn handle_add(&self, cmd: &AddItem) -> Vec<CartEvent> {
        let key = LineKey::new(cmd.product.id().clone(), cmd.material.clone(), cmd.size.clone());

        // Stock is informational; no upper bound is enforced here.
        if self.position(&key).is_some() {
            return vec![CartEvent::QuantityIncremented(QuantityIncremented { key })];
        }

        vec![CartEvent::LineAdded(LineAdded {
            product: cmd.product.clone(),
            material: cmd.material.clone(),
            size: cmd.size.clone(),
        })]
    }

    fn handle_remove(&self, key: &LineKey) -> Vec<CartEvent> {
        if self.position(key).is_none() {
            return vec![];
        }
        vec![CartEvent::LineRemoved(LineRemoved { key: key.clone() })]
    }

    fn handle_update_quantity(&self, cmd: &UpdateQuantity) -> Result<Vec<CartEvent>, DomainError> {
        if cmd.quantity <= 0 {
            return Ok(self.handle_remove(&cmd.key));
        }

        let quantity = u32::try_from(cmd.quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| {
                DomainError::validation(format!("quantity {} is out of range", cmd.quantity))
            })?;

        // A bare key carries no product snapshot, so a missing line stays missing.
        let Some(line) = self.items.iter().find(|i| i.matches(&cmd.key)) else {
            return Ok(vec![]);
        };

        if line.product().price().checked_times(quantity.get()).is_none() {
            return Err(DomainError::validation(format!(
                "quantity {quantity} overflows the line subtotal"
            )));
        }

        Ok(vec![CartEvent::QuantitySet(QuantitySet {
            key: cmd.key.clone(),
            quantity,
        })])
    }

    fn handle_clear(&self) -> Vec<CartEvent> {
        if self.items.is_empty() {
            return vec![];
        }
        vec![CartEvent::CartCleared]
    }
}
