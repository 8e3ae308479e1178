pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod todos;

use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, AuthUser};
pub use db::{DbOperations, Todo, User};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "message": "resource not found"
    }))
}

/// Application state shared across all handlers.
///
/// The store handle is opened here and injected everywhere else; nothing
/// holds a connection at process scope.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db: DbOperations,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        let db = DbOperations::new_with_options(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(config.database.acquire_timeout_secs),
        )
        .await?;

        let auth = Arc::new(AuthService::new(db.clone()));

        Ok(Self {
            config: Arc::new(config),
            db,
            auth,
        })
    }

    pub async fn shutdown(&self) -> Result<()> {
        // Close database connections
        self.db.close().await;

        Ok(())
    }
}
