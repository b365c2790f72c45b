//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated member from a JWT Bearer token.

pub mod auth;
