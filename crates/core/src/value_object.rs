//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A variant category or a combination key has no identity of its own: two
/// categories named `Color` with options `[Red, Blue]` are the same category.
/// "Editing" a value object means building a new one and replacing the old.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ComboKey(Vec<String>);
///
/// impl ValueObject for ComboKey {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
