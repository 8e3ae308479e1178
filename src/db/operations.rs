use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::db::models::{AuthToken, Todo, User};
use crate::error::{AppError, DatabaseError};

/// Data access layer over the shared connection pool.
///
/// The pool is opened once at startup and handed in explicitly; cloning
/// the handle shares the same pool. Every query binds its parameters;
/// nothing is interpolated into SQL text.
#[derive(Clone)]
pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| AppError::Database(DatabaseError::ConnectionError(e.to_string())))?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Closes the underlying pool. Called once on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn create_token(&self, user_id: i32, token: &str) -> Result<AuthToken, AppError> {
        let record = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (user_id, token)
            VALUES ($1, $2)
            RETURNING id, user_id, token, created_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    pub async fn get_token(&self, token: &str) -> Result<Option<AuthToken>, AppError> {
        let record = sqlx::query_as::<_, AuthToken>(
            "SELECT id, user_id, token, created_at FROM auth_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    pub async fn list_todos(&self, user_id: i32) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, todo, completed, user_id FROM todos WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(todos)
    }

    pub async fn get_todo(&self, user_id: i32, todo_id: i32) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, todo, completed, user_id FROM todos WHERE id = $1 AND user_id = $2",
        )
        .bind(todo_id)
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(todos)
    }

    pub async fn create_todo(
        &self,
        user_id: i32,
        todo: &str,
        completed: bool,
    ) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (todo, completed, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, todo, completed, user_id
            "#,
        )
        .bind(todo)
        .bind(completed)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(todo)
    }

    /// The predicate matches both the todo id and its owner, so a caller
    /// cannot reach another user's row by guessing an id. Returns `None`
    /// when nothing matched.
    pub async fn update_todo(
        &self,
        user_id: i32,
        todo_id: i32,
        todo: &str,
        completed: bool,
    ) -> Result<Option<Todo>, AppError> {
        let updated = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET todo = $1, completed = $2
            WHERE id = $3 AND user_id = $4
            RETURNING id, todo, completed, user_id
            "#,
        )
        .bind(todo)
        .bind(completed)
        .bind(todo_id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(updated)
    }
}
