use crate::{
    auth::AuthenticatedUser,
    crud,
    error::AppError,
    models::{Task, TaskCreate, TaskFilter, TaskPatch},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

fn default_limit() -> i64 {
    100
}

/// Query parameters for listing tasks: an offset/limit window plus an
/// optional completion filter.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: i64,
    pub completed: Option<bool>,
}

/// Lists tasks. Public: no token required.
///
/// ## Query Parameters:
/// - `skip` (optional, default 0): offset into the collection.
/// - `limit` (optional, default 100): maximum number of rows returned.
/// - `completed` (optional): only tasks with this completion status.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects in insertion order.
/// - `422 Unprocessable Entity`: negative skip or non-positive limit.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    query.validate()?;

    let filter = TaskFilter {
        completed: query.completed,
    };
    let tasks = crud::list::<Task>(&pool, &filter, query.skip, query.limit).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by id. Public: no token required.
///
/// ## Responses:
/// - `200 OK`: the `Task` object.
/// - `404 Not Found`: no task with that id.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = crud::get::<Task>(&pool, task_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Creates a new task. Requires a valid bearer token.
///
/// The created row is returned in full so the caller sees the
/// server-assigned id and timestamps.
///
/// ## Responses:
/// - `200 OK`: the persisted `Task`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `422 Unprocessable Entity`: validation failure on the payload.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskCreate>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = crud::create::<Task>(&pool, &task_data).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Requires a valid bearer token.
///
/// Only fields present in the body are written; everything else is left
/// untouched. An empty body is legal and only refreshes `updated_at`.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no task with that id.
/// - `422 Unprocessable Entity`: validation failure on the payload.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskPatch>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = crud::update::<Task>(&pool, task_id.into_inner(), &task_data)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task. Requires a valid bearer token.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted successfully"}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: no task with that id.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let deleted = crud::delete::<Task>(&pool, task_id.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}
