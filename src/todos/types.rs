use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `todos` table, as read. All six columns are populated
/// on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertion shape. `user_id` and `title` are mandatory; everything else
/// is omitted from the payload when absent so the backend's defaults
/// apply (generated id, `completed = false`, server timestamps).
#[derive(Debug, Clone, Serialize)]
pub struct NewTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewTodo {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            title: title.into(),
            completed: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Update shape. Every field is optional; absent fields are left
/// untouched by the backend. `id`, when present, must match the target
/// row (update-by-identity is the backend's job, not ours).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TodoChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TodoChanges {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Whether no field is set. The crate forwards empty updates anyway;
    /// this is a caller convenience, not validation.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.user_id.is_none()
            && self.title.is_none()
            && self.completed.is_none()
            && self.updated_at.is_none()
    }
}
