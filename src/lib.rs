//! supabase-todo - Typed Supabase data-access layer for a single-table
//! todo application.
//!
//! Two components over one shared connection handle: an identity gateway
//! that normalizes every Supabase Auth (GoTrue) outcome into a uniform
//! result shape, and a schema contract plus thin accessor for the `todos`
//! table. Every operation is a single stateless round trip; no retries,
//! no caching, no validation of our own.

mod auth;
mod client;
mod config;
mod errors;
mod todos;

pub use auth::{Auth, AuthProvider, Credentials, GoTrue, Session, User};
pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use errors::{ApiError, ConfigError, ProviderError};
pub use todos::{NewTodo, Todo, TodoChanges, TodoStore};
