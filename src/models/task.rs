use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Postgres, QueryBuilder};
use validator::Validate;

use crate::crud::Entity;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Server-assigned identifier, immutable for the life of the row.
    pub id: i32,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// Completion status.
    pub completed: bool,
    /// The priority of the task.
    pub priority: Priority,
    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional weak reference to the owning user. Nothing enforces
    /// ownership on reads or writes.
    pub user_id: Option<i32>,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    /// The title of the task. Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// An optional description for the task.
    pub description: Option<String>,

    /// Completion status, defaults to false.
    #[serde(default)]
    pub completed: bool,

    /// The priority of the task, defaults to medium.
    #[serde(default)]
    pub priority: Priority,

    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,

    /// Optional owning user id.
    pub user_id: Option<i32>,
}

/// Partial update for a task. Absent fields are left untouched; the
/// nullable columns take an explicit `null` to be cleared.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskPatch {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,

    pub completed: Option<bool>,

    pub priority: Option<Priority>,

    #[serde(default, deserialize_with = "super::double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Equality filter applied when listing tasks.
#[derive(Debug, Default)]
pub struct TaskFilter {
    pub completed: Option<bool>,
}

impl Entity for Task {
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static str =
        "id, title, description, completed, priority, due_date, user_id, created_at, updated_at";

    type Create = TaskCreate;
    type Patch = TaskPatch;
    type Filter = TaskFilter;

    fn push_insert<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, payload: &'qb TaskCreate) {
        qb.push("(title, description, completed, priority, due_date, user_id) VALUES (");
        let mut values = qb.separated(", ");
        values.push_bind(&payload.title);
        values.push_bind(&payload.description);
        values.push_bind(payload.completed);
        values.push_bind(payload.priority);
        values.push_bind(payload.due_date);
        values.push_bind(payload.user_id);
        qb.push(")");
    }

    fn push_set<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, patch: &'qb TaskPatch) {
        if let Some(title) = &patch.title {
            qb.push(", title = ");
            qb.push_bind(title);
        }
        if let Some(description) = &patch.description {
            qb.push(", description = ");
            qb.push_bind(description);
        }
        if let Some(completed) = patch.completed {
            qb.push(", completed = ");
            qb.push_bind(completed);
        }
        if let Some(priority) = patch.priority {
            qb.push(", priority = ");
            qb.push_bind(priority);
        }
        if let Some(due_date) = &patch.due_date {
            qb.push(", due_date = ");
            qb.push_bind(due_date);
        }
    }

    fn push_where<'qb>(qb: &mut QueryBuilder<'qb, Postgres>, filter: &'qb TaskFilter) {
        if let Some(completed) = filter.completed {
            qb.push(" AND completed = ");
            qb.push_bind(completed);
        }
    }
}
