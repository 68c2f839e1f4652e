//! `storefront-auth`: simulated admin login for the panel.
//!
//! One configured admin, sessions with a fixed lifetime. Decoupled from
//! storage: the infra crate keeps issued sessions.

pub mod account;
pub mod credentials;
pub mod roles;
pub mod session;

pub use account::AdminAccount;
pub use credentials::AdminCredentials;
pub use roles::Role;
pub use session::{AdminSession, AuthError, Authenticator};
