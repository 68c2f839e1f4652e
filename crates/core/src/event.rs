use chrono::{DateTime, Utc};

/// A fact emitted by an aggregate.
///
/// Events are immutable, named (`"catalog.product.created"`) and versioned so
/// their payloads can evolve.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// Business time of the change.
    fn occurred_at(&self) -> DateTime<Utc>;
}
