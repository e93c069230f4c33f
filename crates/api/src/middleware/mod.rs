//! HTTP middleware and extractors for the Gatehouse API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Bearer-token extractors on protected routes

pub mod auth;

pub use auth::{AuthRejection, RequireAuth};
