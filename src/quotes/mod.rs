//! Quote records and everything built directly on them.
//!
//! - [`QuoteStore`] - ordered in-memory collection (add, import, remote merge)
//! - [`categories_of`] / [`CategoryFilter`] - category index and filter state
//! - [`pick_quote`] - uniform random selection under a filter
//! - [`QuoteBook`] - the store with write-through persistence
//! - [`export_to_file`] / [`read_import_file`] - `quotes.json` export and import

mod book;
mod categories;
mod file;
mod selection;
mod store;
mod types;

pub use book::{LoadSource, QuoteBook};
pub use categories::{categories_of, CategoryFilter, ALL_CATEGORIES};
pub use file::{export_to_file, read_import_file, EXPORT_FILE_NAME, MAX_IMPORT_SIZE};
pub use selection::{pick_quote, Selection};
pub use store::{parse_import, validate_input, QuoteStore};
pub use types::{
    seed_quotes, Quote, QuoteError, LEGACY_CATEGORY, MAX_CATEGORY_LEN, MAX_TEXT_LEN,
};
