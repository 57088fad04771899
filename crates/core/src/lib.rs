//! `giftshop-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no logging).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::Aggregate;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{OrderId, ProductId, Slug};
pub use money::Money;
pub use value_object::ValueObject;
