//! Authentication infrastructure module
//!
//! Resolves presented bearer tokens to caller identities. Token issuance
//! belongs to an external authentication mechanism.

mod jwt;

pub use jwt::{AuthClaims, JwtConfig, JwtService};
