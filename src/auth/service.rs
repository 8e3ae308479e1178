use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

use crate::db::DbOperations;
use crate::error::{AppError, AuthError};

const TOKEN_BYTES: usize = 32;

/// Issues and verifies the opaque bearer tokens that identify signed-in
/// users.
///
/// A token is 32 bytes of entropy, URL-safe base64 encoded, persisted next
/// to its user id. Tokens carry no claims and never expire; a token stays
/// valid until the store is cleared. Verification is a single lookup and
/// never mutates the store.
pub struct AuthService {
    db: DbOperations,
}

impl AuthService {
    pub fn new(db: DbOperations) -> Self {
        Self { db }
    }

    /// Creates the account and signs it in, returning a fresh token.
    pub async fn signup(&self, email: &str, password: &str) -> Result<String, AppError> {
        if email.trim().is_empty() {
            return Err(AppError::Validation("email is required".into()));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password is required".into()));
        }

        let password_hash = hash_password(password)?;
        let user = self.db.create_user(email, &password_hash).await?;

        self.issue_token(user.id).await
    }

    /// Verifies the credentials and returns a fresh token. Previously
    /// issued tokens stay valid.
    ///
    /// Unknown emails and wrong passwords produce the same error, so the
    /// response does not reveal which accounts exist.
    pub async fn signin(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .db
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issue_token(user.id).await
    }

    /// Generates a token for an already-persisted user and writes it
    /// through. The token is only returned once the write succeeded.
    pub async fn issue_token(&self, user_id: i32) -> Result<String, AppError> {
        let token = generate_token();
        self.db.create_token(user_id, &token).await?;
        Ok(token)
    }

    /// Resolves a raw Authorization header value to a user id.
    ///
    /// The header carries the bare token. Missing, empty, and unknown
    /// tokens are all rejected; there is no fallback identity.
    pub async fn verify_token(&self, raw_token: &str) -> Result<i32, AppError> {
        let token = raw_token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        let record = self
            .db
            .get_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(record.user_id)
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("stored password hash is malformed: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_tokens_are_unique() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn test_generated_token_is_header_safe() {
        let token = generate_token();
        // 32 bytes of base64 without padding
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test_log::test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert_ne!(hash, "correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("abcd").unwrap();
        let second = hash_password("abcd").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        let result = verify_password("abcd", "not-a-phc-string");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
