//! Small shared helpers.
//!
//! - **Text**: terminal-safe sanitisation and width-aware truncation
//! - **URLs**: validation of the configured sync endpoint

mod text;
mod url_validator;

pub use text::{strip_control_chars, truncate_to_width};
pub use url_validator::{validate_endpoint, UrlValidationError};
