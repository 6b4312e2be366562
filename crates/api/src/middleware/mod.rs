//! HTTP middleware for the API.
//!
//! The gate chain runs per-handler via extractors: [`auth::RequireAuth`]
//! authenticates and attaches the identity, [`auth::RequireAdmin`]
//! authorizes against it.

pub mod auth;

pub use auth::{RequireAdmin, RequireAuth};
