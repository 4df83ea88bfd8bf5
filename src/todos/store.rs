use reqwest::Method;

use crate::client::{SupabaseClient, execute};
use crate::errors::ApiError;
use crate::todos::types::{NewTodo, Todo, TodoChanges};

const TABLE: &str = "todos";

/// Thin typed accessor for the `todos` table, speaking PostgREST
/// conventions through the shared handle. No validation, no retries;
/// row-level security is the backend's job.
pub struct TodoStore {
    client: SupabaseClient,
}

impl TodoStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Insert a row and return it as the backend stored it, with the
    /// server-assigned id and timestamps.
    pub async fn insert(&self, todo: &NewTodo) -> Result<Todo, ApiError> {
        tracing::debug!(user_id = %todo.user_id, "inserting todo");
        let request = self
            .client
            .rest_request(Method::POST, TABLE)
            .await
            .header("Prefer", "return=representation")
            .json(todo);
        let body = execute(request).await?;

        let mut rows = parse_rows(&body)?;
        rows.pop()
            .ok_or_else(|| ApiError::Transport("Insert returned no representation".to_string()))
    }

    /// Fetch one row by id; `None` when no row matches.
    pub async fn fetch(&self, id: &str) -> Result<Option<Todo>, ApiError> {
        let request = self
            .client
            .rest_request(Method::GET, TABLE)
            .await
            .query(&[eq("id", id), ("select", "*".to_string())]);
        let body = execute(request).await?;

        Ok(parse_rows(&body)?.into_iter().next())
    }

    /// All rows owned by one user, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.rest_request(Method::GET, TABLE).await.query(&[
            eq("user_id", user_id),
            ("order", "created_at.desc".to_string()),
            ("select", "*".to_string()),
        ]);
        let body = execute(request).await?;

        parse_rows(&body)
    }

    /// Apply a partial update to one row and return the updated row;
    /// `None` when no row matches. An empty change set is forwarded as-is
    /// and rejected by the backend.
    pub async fn update(&self, id: &str, changes: &TodoChanges) -> Result<Option<Todo>, ApiError> {
        tracing::debug!(%id, "updating todo");
        let request = self
            .client
            .rest_request(Method::PATCH, TABLE)
            .await
            .query(&[eq("id", id)])
            .header("Prefer", "return=representation")
            .json(changes);
        let body = execute(request).await?;

        Ok(parse_rows(&body)?.into_iter().next())
    }

    /// Delete one row by id. Deleting an absent row is a success; the
    /// backend treats the filter matching nothing as an empty operation.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::debug!(%id, "deleting todo");
        let request = self
            .client
            .rest_request(Method::DELETE, TABLE)
            .await
            .query(&[eq("id", id)]);
        execute(request).await?;
        Ok(())
    }
}

/// PostgREST `eq.` filter pair for one column.
fn eq(column: &'static str, value: &str) -> (&'static str, String) {
    (column, format!("eq.{value}"))
}

/// PostgREST answers every table operation with a JSON array of rows.
fn parse_rows(body: &str) -> Result<Vec<Todo>, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::Transport(format!("Failed to deserialize todos response: {e}")))
}
