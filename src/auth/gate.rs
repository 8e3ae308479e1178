use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::error::{AppError, AuthError};
use crate::AppState;

/// Identity attached to a request that passed the auth gate.
///
/// Extraction reads the raw Authorization header value (the bare token, no
/// scheme prefix) and resolves it against the store. When the header is
/// missing or the token is unknown, extraction fails with 401 and the
/// handler body never runs, so a handler taking this argument only ever
/// sees authenticated traffic.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i32,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::Internal("application state is not configured".into()))?;

            let raw = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .ok_or(AuthError::MissingToken)?;

            let user_id = state.auth.verify_token(raw).await?;

            Ok(AuthUser { user_id })
        })
    }
}
