//! Schema contract for the `todos` table and its typed accessor.

mod store;
mod types;

pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoChanges};
