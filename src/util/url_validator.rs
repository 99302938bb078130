use thiserror::Error;
use url::Url;

/// Errors from validating the sync endpoint.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

/// Validate the configured sync endpoint.
///
/// Only `http` and `https` are accepted. Localhost is allowed: a local mock
/// server is the normal development setup.
pub fn validate_endpoint(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        let url = validate_endpoint("https://jsonplaceholder.typicode.com/posts").unwrap();
        assert_eq!(url.host_str(), Some("jsonplaceholder.typicode.com"));
    }

    #[test]
    fn test_accepts_localhost() {
        assert!(validate_endpoint("http://127.0.0.1:8080/posts").is_ok());
        assert!(validate_endpoint("http://localhost/posts").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            validate_endpoint("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_endpoint("ftp://example.com/"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            validate_endpoint("not a url"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }
}
