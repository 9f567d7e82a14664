use crate::{
    auth::AuthenticatedUser,
    crud,
    error::AppError,
    models::{Note, NoteCreate, NotePatch},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

fn default_limit() -> i64 {
    100
}

/// Query parameters for listing notes: an offset/limit window.
#[derive(Debug, Deserialize, Validate)]
pub struct NoteListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: i64,
}

/// Lists notes in insertion order. Public: no token required.
#[get("")]
pub async fn list_notes(
    pool: web::Data<PgPool>,
    query: web::Query<NoteListQuery>,
) -> Result<impl Responder, AppError> {
    query.validate()?;

    let notes = crud::list::<Note>(&pool, &(), query.skip, query.limit).await?;

    Ok(HttpResponse::Ok().json(notes))
}

/// Retrieves a single note by id. Public: no token required.
#[get("/{id}")]
pub async fn get_note(
    pool: web::Data<PgPool>,
    note_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let note = crud::get::<Note>(&pool, note_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Note not found".into()))?;

    Ok(HttpResponse::Ok().json(note))
}

/// Creates a new note. Requires a valid bearer token.
#[post("")]
pub async fn create_note(
    pool: web::Data<PgPool>,
    note_data: web::Json<NoteCreate>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    note_data.validate()?;

    let note = crud::create::<Note>(&pool, &note_data).await?;

    Ok(HttpResponse::Ok().json(note))
}

/// Partially updates a note. Requires a valid bearer token.
///
/// Only fields present in the body are written. An empty body is legal and
/// only refreshes `updated_at`.
#[put("/{id}")]
pub async fn update_note(
    pool: web::Data<PgPool>,
    note_id: web::Path<i32>,
    note_data: web::Json<NotePatch>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    note_data.validate()?;

    let note = crud::update::<Note>(&pool, note_id.into_inner(), &note_data)
        .await?
        .ok_or_else(|| AppError::NotFound("Note not found".into()))?;

    Ok(HttpResponse::Ok().json(note))
}

/// Deletes a note. Requires a valid bearer token.
#[delete("/{id}")]
pub async fn delete_note(
    pool: web::Data<PgPool>,
    note_id: web::Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let deleted = crud::delete::<Note>(&pool, note_id.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Note not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Note deleted successfully" })))
}
