//! Request middleware: identity extraction and authorization.

pub mod auth;
pub mod policy;

pub use auth::AuthUser;
pub use policy::{PolicyClient, PolicyError};
