use actix_web::dev::Payload;
use actix_web::{http::header, web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::{self, TokenKeys};
use crate::error::AppError;
use crate::models::User;

/// Extracts and resolves the authenticated user from the request's bearer
/// token.
///
/// Add this extractor to any handler that requires authentication: it parses
/// the `Authorization: Bearer <token>` header, verifies the token against
/// the process-wide [`TokenKeys`], and loads the subject's user row. Reads
/// stay public simply by not taking the extractor.
///
/// Failures surface as 401: a missing or invalid token as
/// [`AppError::InvalidToken`], a verified token whose subject no longer
/// exists as [`AppError::UserNotFound`].
#[derive(Debug)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .ok_or(AppError::InvalidToken)?
                .to_owned();

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("Database pool not configured".into())
                })?;
            let keys = req
                .app_data::<web::Data<TokenKeys>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("Token keys not configured".into())
                })?;

            let user = auth::resolve(pool.get_ref(), keys.get_ref(), &token).await?;
            Ok(AuthenticatedUser(user))
        })
    }
}
