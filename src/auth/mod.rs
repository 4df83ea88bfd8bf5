//! Identity gateway over the Supabase Auth (GoTrue) API.

mod flow;
mod gotrue;
mod provider;
mod types;

pub use flow::Auth;
pub use gotrue::GoTrue;
pub use provider::AuthProvider;
pub use types::{Credentials, Session, User};
