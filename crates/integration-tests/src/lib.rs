//! Integration tests for Gatehouse.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p gatehouse-cli -- migrate
//!
//! # Start the API server
//! cargo run -p gatehouse-api
//!
//! # Run integration tests
//! cargo test -p gatehouse-integration-tests -- --ignored
//! ```
//!
//! The tests exercise the live HTTP surface: registration, login, and the
//! authenticated current-user endpoint. They are `#[ignore]`-gated because
//! they need a running server and database.
