use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Liveness probe. No auth, no database touch.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "message": "API is operational"
    }))
}
