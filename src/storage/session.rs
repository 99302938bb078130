use anyhow::Result;

use super::schema::Database;
use super::types::KEY_LAST_QUOTE;
use crate::quotes::Quote;

impl Database {
    // ========================================================================
    // Session Key-Value Operations
    // ========================================================================

    pub async fn get_session(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM session_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    pub async fn set_session(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session_storage (key, value, updated_at)
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

    /// Drop every session-scoped value. Called when the UI exits cleanly.
    pub async fn end_session(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM session_storage")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ========================================================================
    // Last Viewed Quote
    // ========================================================================

    /// Remember the quote currently on screen, always in object form.
    pub async fn save_last_viewed(&self, quote: &Quote) -> Result<()> {
        let json = serde_json::to_string(quote)?;
        self.set_session(KEY_LAST_QUOTE, &json).await
    }

    /// The quote shown last in this session.
    ///
    /// Early versions stored the bare quote text without JSON encoding; such a
    /// value is read back as a quote in the legacy category.
    pub async fn restore_last_viewed(&self) -> Result<Option<Quote>> {
        let Some(raw) = self.get_session(KEY_LAST_QUOTE).await? else {
            return Ok(None);
        };

        if let Ok(quote) = serde_json::from_str::<Quote>(&raw) {
            return Ok(Some(quote));
        }

        let text = raw.trim();
        if text.is_empty() {
            return Ok(None);
        }
        tracing::debug!("Migrating plain-text lastQuote value");
        Ok(Some(Quote::legacy(text)))
    }
}
