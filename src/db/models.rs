use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered account. The password is stored as an Argon2id hash,
/// never in plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// One issued bearer token. Tokens are opaque strings bound to exactly
/// one user; the UNIQUE constraint on `token` makes collisions a store
/// error rather than a silent mixup.
#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub todo: String,
    pub completed: bool,
    pub user_id: i32,
}
