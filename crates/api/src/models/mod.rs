//! Domain models for the Gatehouse API.

pub mod user;

pub use user::{NewUser, User};
