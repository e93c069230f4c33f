//! Signed bearer token issuance and verification.
//!
//! Tokens are JWTs (HS256) binding a user identifier to an expiry timestamp,
//! signed with the process-wide secret configured at startup. Claims:
//! `sub` = user ID, `iat` = issued-at, `exp` = issued-at + configured TTL.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatehouse_core::UserId;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed or the token is malformed, tampered with, or expired.
    #[error("token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The subject claim does not hold a user ID.
    #[error("token subject is not a user id")]
    InvalidSubject,
}

/// Claims encoded into every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID, as a string per JWT convention.
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Issues and verifies signed, time-bound user tokens.
///
/// Read-only after startup and shared across requests via `AppState`.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a token issuer from the signing secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_secs: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issue a signed token asserting `user_id` until the configured expiry.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Jwt` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token's signature and expiry, returning the asserted user ID.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Jwt` if the signature is invalid or the token has
    /// expired, and `TokenError::InvalidSubject` if the subject claim does not
    /// parse as a user ID.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        let id = data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| TokenError::InvalidSubject)?;

        Ok(UserId::new(id))
    }
}
