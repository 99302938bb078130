use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::store::parse_import;
use super::types::{Quote, QuoteError};

/// Default export file name.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Upper bound on an import file, checked before reading.
pub const MAX_IMPORT_SIZE: u64 = 5 * 1024 * 1024;

/// Write `json` to `path` atomically (temp file, fsync, rename).
///
/// The destination is never left half-written.
pub fn export_to_file(json: &str, path: &Path) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    // Unpredictable temp name so nothing can be planted at it beforehand
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions",
                temp_path.display()
            )
        })?;

    file.write_all(json.as_bytes()).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!("Failed to write quotes to '{}'", temp_path.display())
    })?;

    file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!("Failed to sync '{}' to disk", temp_path.display())
    })?;

    drop(file);

    // Windows refuses to rename over an existing file
    #[cfg(windows)]
    if path.exists() {
        std::fs::remove_file(path).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!("Failed to replace existing '{}'", path.display())
        })?;
    }

    std::fs::rename(&temp_path, path).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}'",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

/// Read and parse a user-supplied quotes file.
///
/// Oversized files, I/O failures and malformed JSON all come back as
/// [`QuoteError`] so callers can surface them as input errors.
pub fn read_import_file(path: &Path) -> Result<Vec<Quote>, QuoteError> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_IMPORT_SIZE {
        return Err(QuoteError::ImportTooLarge(meta.len()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_import(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::QuoteStore;

    #[test]
    fn test_export_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let store = QuoteStore::seeded();

        export_to_file(&store.to_export_json().unwrap(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[\n"));
        assert!(written.contains("\"category\": \"Life\""));
    }

    #[test]
    fn test_export_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        std::fs::write(&path, "old").unwrap();

        export_to_file("[]", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_export_then_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let store = QuoteStore::seeded();
        export_to_file(&store.to_export_json().unwrap(), &path).unwrap();

        let imported = read_import_file(&path).unwrap();
        assert_eq!(imported, store.quotes());
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_import_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, QuoteError::Io(_)));
    }

    #[test]
    fn test_import_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{\"text\": \"unterminated").unwrap();
        assert!(matches!(
            read_import_file(&path),
            Err(QuoteError::Import(_))
        ));
    }

    #[test]
    fn test_import_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.json");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_IMPORT_SIZE + 1).unwrap();
        assert!(matches!(
            read_import_file(&path),
            Err(QuoteError::ImportTooLarge(_))
        ));
    }
}
