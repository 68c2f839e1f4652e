//! `storefront-core`: building blocks shared by the catalog, auth and infra crates.
//!
//! Nothing in here performs IO.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{AggregateId, SessionId, UserId};
pub use value_object::ValueObject;
