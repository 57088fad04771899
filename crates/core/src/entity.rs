//! Entity trait: things addressed by identity rather than by value.

/// A domain object with a stable identifier.
///
/// Products are entities: a cart line keeps pointing at the same product id even
/// though it stores its own snapshot of the product's fields.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
