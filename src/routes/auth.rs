use crate::{
    auth::{self, AuthenticatedUser, LoginRequest, RegisterRequest, TokenKeys},
    error::AppError,
    models::UserView,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns it (without password material).
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = auth::register(&pool, &register_data).await?;

    Ok(HttpResponse::Ok().json(UserView::from(user)))
}

/// Login user
///
/// Authenticates a user and returns a bearer access token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    keys: web::Data<TokenKeys>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let token = auth::login(&pool, &keys, &login_data).await?;

    Ok(HttpResponse::Ok().json(token))
}

/// Current user
///
/// Returns the account behind the presented bearer token.
#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(UserView::from(user.0)))
}
