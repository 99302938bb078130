use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum quote text length in characters.
pub const MAX_TEXT_LEN: usize = 1000;
/// Maximum category label length in characters.
pub const MAX_CATEGORY_LEN: usize = 64;
/// Category assigned to quotes stored by early versions as bare strings.
pub const LEGACY_CATEGORY: &str = "General";

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised by quote validation and the export/import codec.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Please enter a quote")]
    EmptyText,

    #[error("Please enter a category")]
    EmptyCategory,

    #[error("Quote is too long ({0} chars, max {MAX_TEXT_LEN})")]
    TextTooLong(usize),

    #[error("Category is too long ({0} chars, max {MAX_CATEGORY_LEN})")]
    CategoryTooLong(usize),

    /// The import payload is not a JSON array of quote records.
    #[error("Invalid quotes file: {0}")]
    Import(#[from] serde_json::Error),

    #[error("Import file too large ({0} bytes)")]
    ImportTooLarge(u64),

    #[error("Failed to read quotes file: {0}")]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    /// True for errors caused by user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::EmptyCategory | Self::TextTooLong(_) | Self::CategoryTooLong(_)
        )
    }
}

// ============================================================================
// Quote
// ============================================================================

/// A single `{text, category}` record.
///
/// Quotes carry no identifier; two quotes are the same quote when their
/// `text` is byte-for-byte equal. Deserialization also accepts the bare
/// string form written by the first version of the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "QuoteRecord")]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Build a quote from a bare legacy string.
    pub fn legacy(text: impl Into<String>) -> Self {
        Self::new(text, LEGACY_CATEGORY)
    }
}

/// Wire shapes accepted for a stored or imported quote.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuoteRecord {
    Full { text: String, category: String },
    Legacy(String),
}

impl From<QuoteRecord> for Quote {
    fn from(record: QuoteRecord) -> Self {
        match record {
            QuoteRecord::Full { text, category } => Quote { text, category },
            QuoteRecord::Legacy(text) => Quote::legacy(text),
        }
    }
}

/// The built-in quotes used when nothing has been stored yet.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The best way to predict the future is to invent it.",
            "Innovation",
        ),
        Quote::new(
            "Life is 10% what happens to us and 90% how we react to it.",
            "Life",
        ),
        Quote::new(
            "Do not watch the clock. Do what it does. Keep going.",
            "Motivation",
        ),
        Quote::new(
            "Success is not in what you have, but who you are.",
            "Success",
        ),
    ]
}
