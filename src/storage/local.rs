use anyhow::Result;

use super::schema::Database;
use super::types::{StoredQuotes, KEY_QUOTES, KEY_SELECTED_CATEGORY};
use crate::quotes::{CategoryFilter, Quote};

impl Database {
    // ========================================================================
    // Durable Key-Value Operations
    // ========================================================================

    /// Get a durable value by key, or `None` if never written.
    pub async fn get_local(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM local_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a durable value (UPSERT).
    pub async fn set_local(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Quotes Slot
    // ========================================================================

    /// Overwrite the durable quote list.
    pub async fn save_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let json = serde_json::to_string(quotes)?;
        self.set_local(KEY_QUOTES, &json).await
    }

    /// Read the durable quote list.
    ///
    /// A value that does not parse is reported as [`StoredQuotes::Corrupt`]
    /// instead of an error so the caller can pick its fallback.
    pub async fn restore_quotes(&self) -> Result<StoredQuotes> {
        let Some(raw) = self.get_local(KEY_QUOTES).await? else {
            return Ok(StoredQuotes::Missing);
        };

        match serde_json::from_str::<Vec<Quote>>(&raw) {
            Ok(quotes) => Ok(StoredQuotes::Valid(quotes)),
            Err(e) => Ok(StoredQuotes::Corrupt {
                error: e.to_string(),
            }),
        }
    }

    // ========================================================================
    // Selected Category Slot
    // ========================================================================

    pub async fn save_selected_category(&self, filter: &CategoryFilter) -> Result<()> {
        self.set_local(KEY_SELECTED_CATEGORY, filter.as_str()).await
    }

    /// The persisted filter, which may name a category that no longer exists.
    pub async fn restore_selected_category(&self) -> Result<Option<CategoryFilter>> {
        Ok(self
            .get_local(KEY_SELECTED_CATEGORY)
            .await?
            .map(|v| CategoryFilter::from_label(&v)))
    }
}

#[cfg(test)]
mod tests {
    use crate::quotes::{CategoryFilter, Quote};
    use crate::storage::{Database, StoredQuotes, KEY_QUOTES};
    use pretty_assertions::assert_eq;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_get_local_missing() {
        let db = test_db().await;
        assert_eq!(db.get_local("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_local_upsert() {
        let db = test_db().await;
        db.set_local("k", "one").await.unwrap();
        db.set_local("k", "two").await.unwrap();
        assert_eq!(db.get_local("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_restore_quotes_missing() {
        let db = test_db().await;
        assert_eq!(db.restore_quotes().await.unwrap(), StoredQuotes::Missing);
    }

    #[tokio::test]
    async fn test_save_and_restore_quotes() {
        let db = test_db().await;
        let quotes = vec![Quote::new("a", "Life"), Quote::new("b", "Work")];
        db.save_quotes(&quotes).await.unwrap();
        assert_eq!(db.restore_quotes().await.unwrap(), StoredQuotes::Valid(quotes));
    }

    #[tokio::test]
    async fn test_quotes_stored_as_plain_json_array() {
        let db = test_db().await;
        db.save_quotes(&[Quote::new("a", "Life")]).await.unwrap();
        let raw = db.get_local(KEY_QUOTES).await.unwrap().unwrap();
        assert_eq!(raw, r#"[{"text":"a","category":"Life"}]"#);
    }

    #[tokio::test]
    async fn test_restore_legacy_string_array() {
        let db = test_db().await;
        db.set_local(KEY_QUOTES, r#"["First","Second"]"#).await.unwrap();
        match db.restore_quotes().await.unwrap() {
            StoredQuotes::Valid(quotes) => {
                assert_eq!(quotes.len(), 2);
                assert_eq!(quotes[0], Quote::legacy("First"));
            }
            other => panic!("Expected Valid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_restore_corrupt_quotes() {
        let db = test_db().await;
        db.set_local(KEY_QUOTES, "{not json").await.unwrap();
        assert!(matches!(
            db.restore_quotes().await.unwrap(),
            StoredQuotes::Corrupt { .. }
        ));
    }

    #[tokio::test]
    async fn test_selected_category_round_trip() {
        let db = test_db().await;
        assert_eq!(db.restore_selected_category().await.unwrap(), None);

        let filter = CategoryFilter::Category("Life".into());
        db.save_selected_category(&filter).await.unwrap();
        assert_eq!(db.restore_selected_category().await.unwrap(), Some(filter));

        db.save_selected_category(&CategoryFilter::All).await.unwrap();
        assert_eq!(
            db.restore_selected_category().await.unwrap(),
            Some(CategoryFilter::All)
        );
    }

    #[tokio::test]
    async fn test_selected_category_keeps_label_verbatim() {
        let db = test_db().await;
        for label in [" Life ", ""] {
            let filter = CategoryFilter::Category(label.into());
            db.save_selected_category(&filter).await.unwrap();
            assert_eq!(db.restore_selected_category().await.unwrap(), Some(filter));
        }
    }
}
