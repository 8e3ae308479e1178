use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub todo: String,
    pub completed: bool,
}

/// GET /api/todos: every todo owned by the caller.
pub async fn list_todos(
    user: AuthUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todos = state.db.list_todos(user.user_id).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// GET /api/todos/{id}: the caller's todo with that id, as an array.
/// A foreign or unknown id yields an empty array.
pub async fn get_todo(
    user: AuthUser,
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todos = state.db.get_todo(user.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// POST /api/todos: create a todo owned by the caller. The response is
/// an array containing the created row.
pub async fn create_todo(
    user: AuthUser,
    req: web::Json<CreateTodoRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.todo.trim().is_empty() {
        return Err(AppError::Validation("todo text is required".into()));
    }

    info!("Creating todo for user {}", user.user_id);
    let todo = state
        .db
        .create_todo(user.user_id, &req.todo, req.completed)
        .await?;

    Ok(HttpResponse::Ok().json(vec![todo]))
}

/// PUT /api/todos/{id}: update one of the caller's todos. The write
/// predicate matches both the id and the owner; when nothing matched the
/// caller gets a 404 rather than an empty body.
pub async fn update_todo(
    user: AuthUser,
    path: web::Path<i32>,
    req: web::Json<UpdateTodoRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo_id = path.into_inner();

    info!("Updating todo {} for user {}", todo_id, user.user_id);
    let updated = state
        .db
        .update_todo(user.user_id, todo_id, &req.todo, req.completed)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no todo with id {}", todo_id)))?;

    Ok(HttpResponse::Ok().json(updated))
}
