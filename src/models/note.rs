use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, QueryBuilder};
use validator::Validate;

use crate::crud::Entity;

/// Represents a note entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i32,
    /// Optional title, at most 255 characters.
    pub title: Option<String>,
    /// The note body. Required, at least one character.
    pub content: String,
    /// Optional weak reference to the owning user.
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a note.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NoteCreate {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub content: String,

    pub user_id: Option<i32>,
}

/// Partial update for a note. Absent fields are left untouched; `title` and
/// `user_id` are nullable and take an explicit `null` to be cleared.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct NotePatch {
    #[serde(default, deserialize_with = "super::double_option")]
    pub title: Option<Option<String>>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "super::double_option")]
    pub user_id: Option<Option<i32>>,
}

impl Entity for Note {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static str = "id, title, content, user_id, created_at, updated_at";

    type Create = NoteCreate;
    type Patch = NotePatch;
    type Filter = ();

    fn push_insert<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, payload: &'qb NoteCreate) {
        qb.push("(title, content, user_id) VALUES (");
        let mut values = qb.separated(", ");
        values.push_bind(&payload.title);
        values.push_bind(&payload.content);
        values.push_bind(payload.user_id);
        qb.push(")");
    }

    fn push_set<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, patch: &'qb NotePatch) {
        if let Some(title) = &patch.title {
            qb.push(", title = ");
            qb.push_bind(title);
        }
        if let Some(content) = &patch.content {
            qb.push(", content = ");
            qb.push_bind(content);
        }
        if let Some(user_id) = &patch.user_id {
            qb.push(", user_id = ");
            qb.push_bind(user_id);
        }
    }

    fn push_where<'qb>(_qb: &mut QueryBuilder<'qb, Postgres>, _filter: &'qb ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_note_create_validation() {
        let valid_input = NoteCreate {
            title: Some("Shopping".to_string()),
            content: "milk, eggs".to_string(),
            user_id: None,
        };
        assert!(valid_input.validate().is_ok());

        // Title is optional
        let untitled = NoteCreate {
            title: None,
            content: "a".to_string(),
            user_id: Some(1),
        };
        assert!(untitled.validate().is_ok());

        // Content is required and non-empty
        let empty_content = NoteCreate {
            title: None,
            content: "".to_string(),
            user_id: None,
        };
        assert!(empty_content.validate().is_err());
    }

    #[test]
    fn test_note_patch_clears_title_with_explicit_null() {
        let patch: NotePatch = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(patch.title, Some(None));
        assert_eq!(patch.content, None);

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE notes SET updated_at = now()");
        Note::push_set(&mut qb, &patch);
        let sql = qb.into_sql();
        assert!(sql.contains("title = "));
        assert!(!sql.contains("content"));
    }

    #[test]
    fn test_note_patch_empty_is_noop() {
        let patch: NotePatch = serde_json::from_str("{}").unwrap();
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE notes SET updated_at = now()");
        Note::push_set(&mut qb, &patch);
        assert_eq!(qb.into_sql(), "UPDATE notes SET updated_at = now()");
    }
}
