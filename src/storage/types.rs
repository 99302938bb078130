use thiserror::Error;

use crate::quotes::Quote;

// ============================================================================
// Storage Keys
// ============================================================================

/// Durable slot holding the JSON array of quotes.
pub const KEY_QUOTES: &str = "quotes";
/// Durable slot holding the selected category filter.
pub const KEY_SELECTED_CATEGORY: &str = "selectedCategory";
/// Session slot holding the last displayed quote.
pub const KEY_LAST_QUOTE: &str = "lastQuote";

// ============================================================================
// Error Types
// ============================================================================

/// Database-specific errors with user-friendly messages
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Another instance of the application has locked the database
    #[error("Another instance of quotebook appears to be running. Please close it and try again.")]
    InstanceLocked,

    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Check if a sqlx error indicates database locking
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if is_lock_message(&err.to_string()) {
            return DatabaseError::InstanceLocked;
        }
        DatabaseError::Other(err)
    }
}

/// SQLITE_BUSY, SQLITE_LOCKED and SQLITE_CANTOPEN all mean another process
/// owns the file.
pub(crate) fn is_lock_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("database is locked")
        || lower.contains("database table is locked")
        || lower.contains("sqlite_busy")
        || lower.contains("sqlite_locked")
        || lower.contains("unable to open database file")
}

// ============================================================================
// Restore Results
// ============================================================================

/// What the durable `quotes` slot contained at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredQuotes {
    /// Nothing has been saved yet.
    Missing,
    Valid(Vec<Quote>),
    /// The slot holds something that is not a JSON array of quotes.
    Corrupt { error: String },
}
