//! SQLite-backed persistence.
//!
//! Two key-value tables stand in for browser storage:
//!
//! - `local_storage` survives restarts (quotes, selected category)
//! - `session_storage` is cleared by [`Database::end_session`] on clean exit
//!   (last viewed quote)

mod local;
mod schema;
mod session;
mod types;

pub use schema::Database;
pub use types::{DatabaseError, StoredQuotes, KEY_LAST_QUOTE, KEY_QUOTES, KEY_SELECTED_CATEGORY};
