use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A user row as stored in the database.
///
/// Carries the password hash, so it is never serialized directly; handlers
/// convert to [`UserView`] before responding.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The outward shape of a user. No password material, ever.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_view_never_exposes_password_hash() {
        let now = Utc::now();
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$somethingsecret".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&UserView::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("somethingsecret"));
        assert!(json.contains("\"username\":\"alice\""));
    }
}
