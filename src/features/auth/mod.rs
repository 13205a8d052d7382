//! Bearer-token authentication.
//!
//! Login and registration are handled by the hosted auth provider; this
//! module only validates the HS256 tokens it issues and exposes the
//! authenticated user (id + role) to handlers via request extensions
//! and extractor guards.

pub mod guards;
pub mod model;
pub mod validator;

pub use validator::JwtValidator;
