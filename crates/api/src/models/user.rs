//! User domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. [`User`] carries no password material: the hash lives only in the
//! repository layer, so serializing a user for a response cannot leak it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gatehouse_core::{Email, UserId};

/// A registered user (domain type).
///
/// Serializes in camelCase for the HTTP surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's first name.
    pub first_name: String,
    /// User's last name.
    pub last_name: String,
    /// Optional profile image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A validated, hashed record ready to be persisted.
#[derive(Debug)]
pub struct NewUser {
    /// Validated email address.
    pub email: Email,
    /// Trimmed first name.
    pub first_name: String,
    /// Trimmed last name.
    pub last_name: String,
    /// Argon2 PHC string, never the plaintext password.
    pub password_hash: String,
    /// Optional trimmed profile image reference.
    pub profile_image: Option<String>,
}
