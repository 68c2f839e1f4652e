//! Entity trait: identity that survives edits.

/// Anything looked up by id rather than by value (slides inside a lineup,
/// admin accounts).
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
