pub mod note;
pub mod task;
pub mod user;

pub use note::{Note, NoteCreate, NotePatch};
pub use task::{Priority, Task, TaskCreate, TaskFilter, TaskPatch};
pub use user::{User, UserView};

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable patch field so that an absent key and an explicit
/// `null` stay distinguishable: missing -> `None` (leave the column alone),
/// `null` -> `Some(None)` (clear the column), value -> `Some(Some(v))`.
///
/// Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
