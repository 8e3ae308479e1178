use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

pub async fn signup(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received signup request for email: {}", req.email);
    match state.auth.signup(&req.email, &req.password).await {
        Ok(token) => {
            info!("Signup successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(AuthResponse { token }))
        }
        Err(e) => {
            error!("Signup failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn signin(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received signin request for email: {}", req.email);
    match state.auth.signin(&req.email, &req.password).await {
        Ok(token) => {
            info!("Signin successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(AuthResponse { token }))
        }
        Err(e) => {
            error!("Signin failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}
