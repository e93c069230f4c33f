//! Business logic services for the Gatehouse API.
//!
//! # Services
//!
//! - `auth` - Registration and login (input validation, argon2 hashing)
//! - `token` - Signed bearer token issuance and verification

pub mod auth;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use token::{TokenError, TokenIssuer};
