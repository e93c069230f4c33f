//! Authentication service.
//!
//! Orchestrates the registration and login workflows: input trimming and
//! validation, argon2 password hashing and verification, persistence through
//! the user repository, and token issuance on successful login.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use gatehouse_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{NewUser, User};
use crate::services::token::TokenIssuer;

/// Registration input as submitted by the client, untrimmed and unvalidated.
#[derive(Debug)]
pub struct RegistrationInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub profile_image: Option<String>,
}

/// Login input as submitted by the client, untrimmed and unvalidated.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Authentication service.
///
/// Per-request and stateless: holds only borrows of the shared pool and
/// token issuer.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenIssuer) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new user.
    ///
    /// Trims all fields, validates them, checks for an existing account,
    /// hashes the password, and persists the record. Validation happens
    /// before any store access, so invalid input has no side effects. The
    /// unique index on `email` backstops the duplicate check: two concurrent
    /// registrations yield exactly one success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if a required field is empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, input: &RegistrationInput) -> Result<User, AuthError> {
        let first_name = input.first_name.trim();
        let last_name = input.last_name.trim();
        let password = input.password.trim();
        let profile_image = input
            .profile_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        validate_required(first_name, "firstName")?;
        validate_required(last_name, "lastName")?;
        validate_required(password, "password")?;
        validate_required(input.email.trim(), "email")?;
        let email = Email::parse(input.email.trim())?;

        // Fast-path duplicate check before the expensive hash. The unique
        // index on email remains the backstop against concurrent inserts.
        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&NewUser {
                email,
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                password_hash,
                profile_image: profile_image.map(str::to_owned),
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password, issuing a token on success.
    ///
    /// Unknown account, malformed email, and wrong password are all the same
    /// externally observable `InvalidCredentials` failure, so a caller cannot
    /// probe which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if email or password is empty.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, input: &LoginInput) -> Result<(User, String), AuthError> {
        let email = input.email.trim();
        let password = input.password.trim();

        validate_required(email, "email")?;
        validate_required(password, "password")?;

        // A malformed email cannot belong to any account; fail exactly like
        // an unknown one.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.issue(user.id)?;

        Ok((user, token))
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate that a trimmed field is non-empty.
fn validate_required(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_hash_password_is_not_plaintext() {
        let hash = hash_password("secret").unwrap();
        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_password_is_salted() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password("secret", &hash).is_ok());
    }

    #[test]
    fn test_verify_password_mismatch() {
        let hash = hash_password("secret").unwrap();
        let err = verify_password("wrong", &hash).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_verify_password_garbage_hash() {
        let err = verify_password("secret", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("x", "field").is_ok());
        let err = validate_required("", "firstName").unwrap_err();
        assert!(matches!(err, AuthError::MissingField("firstName")));
        assert_eq!(err.to_string(), "firstName is required");
    }

    /// A lazy pool never connects, so reaching the repository would fail with
    /// a database error rather than a validation error.
    fn disconnected_pool() -> PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://127.0.0.1:1/unreachable")
            .unwrap()
    }

    fn test_tokens() -> TokenIssuer {
        TokenIssuer::new(&SecretString::from("k".repeat(48)), 3600)
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields_before_store_access() {
        let pool = disconnected_pool();
        let tokens = test_tokens();
        let auth = AuthService::new(&pool, &tokens);

        let input = RegistrationInput {
            email: "a@b.com".to_string(),
            first_name: "   ".to_string(),
            last_name: "B".to_string(),
            password: "secret".to_string(),
            profile_image: None,
        };

        let err = auth.register(&input).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingField("firstName")));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email_before_store_access() {
        let pool = disconnected_pool();
        let tokens = test_tokens();
        let auth = AuthService::new(&pool, &tokens);

        let input = RegistrationInput {
            email: "not-an-email".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: "secret".to_string(),
            profile_image: None,
        };

        let err = auth.register(&input).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn test_login_rejects_empty_password_before_store_access() {
        let pool = disconnected_pool();
        let tokens = test_tokens();
        let auth = AuthService::new(&pool, &tokens);

        let input = LoginInput {
            email: "a@b.com".to_string(),
            password: String::new(),
        };

        let err = auth.login(&input).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingField("password")));
    }

    #[tokio::test]
    async fn test_login_malformed_email_is_invalid_credentials() {
        let pool = disconnected_pool();
        let tokens = test_tokens();
        let auth = AuthService::new(&pool, &tokens);

        let input = LoginInput {
            email: "no-at-symbol".to_string(),
            password: "secret".to_string(),
        };

        // Not a validation error: indistinguishable from an unknown account
        let err = auth.login(&input).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
