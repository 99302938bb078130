use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;

use super::categories::CategoryFilter;
use super::file::{export_to_file, read_import_file};
use super::selection::{pick_quote, Selection};
use super::store::QuoteStore;
use super::types::Quote;
use crate::storage::{Database, StoredQuotes};

/// How the in-memory store was populated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Restored from the durable `quotes` slot.
    Stored,
    /// Nothing stored yet; using the seed set.
    Seeded,
    /// Stored value was unreadable; using the seed set.
    RecoveredFromCorrupt,
}

/// The quote store with write-through persistence.
///
/// Every mutation writes the full list to the durable `quotes` slot. When that
/// write fails the in-memory append is rolled back, so memory and disk never
/// disagree about a half-applied operation.
pub struct QuoteBook {
    store: QuoteStore,
    db: Database,
    source: LoadSource,
}

impl QuoteBook {
    /// Load the persisted list, falling back to the seed set.
    ///
    /// A corrupt stored value is logged and replaced by the seed set in
    /// memory; it is overwritten on the next mutation.
    pub async fn load(db: Database) -> Result<Self> {
        let (store, source) = match db.restore_quotes().await? {
            StoredQuotes::Valid(quotes) => {
                tracing::debug!(count = quotes.len(), "Restored quotes from storage");
                (QuoteStore::new(quotes), LoadSource::Stored)
            }
            StoredQuotes::Missing => (QuoteStore::seeded(), LoadSource::Seeded),
            StoredQuotes::Corrupt { error } => {
                tracing::warn!(error = %error, "Stored quotes are malformed, using built-in quotes");
                (QuoteStore::seeded(), LoadSource::RecoveredFromCorrupt)
            }
        };
        Ok(Self { store, db, source })
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn quotes(&self) -> &[Quote] {
        self.store.quotes()
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    /// Write the whole list through, undoing appends past `rollback_to` on failure.
    async fn persist_or_rollback(&mut self, rollback_to: usize) -> Result<()> {
        if let Err(e) = self.db.save_quotes(self.store.quotes()).await {
            self.store.truncate(rollback_to);
            return Err(e.context("Failed to save quotes"));
        }
        Ok(())
    }

    /// Validate, append and persist a user-entered quote.
    ///
    /// Validation failures surface as [`super::QuoteError`] inside the returned error.
    pub async fn add(&mut self, text: &str, category: &str) -> Result<Quote> {
        let before = self.store.len();
        let quote = self.store.add(text, category)?.clone();
        self.persist_or_rollback(before).await?;
        tracing::info!(category = %quote.category, "Quote added");
        Ok(quote)
    }

    /// Append a batch verbatim and persist once.
    pub async fn import_many(&mut self, records: Vec<Quote>) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let before = self.store.len();
        let count = self.store.import_many(records);
        self.persist_or_rollback(before).await?;
        tracing::info!(count, "Quotes imported");
        Ok(count)
    }

    /// Parse a quotes file and import it. The store is untouched on any error.
    pub async fn import_file(&mut self, path: &Path) -> Result<usize> {
        let records = read_import_file(path)?;
        self.import_many(records).await
    }

    /// Merge quotes fetched from the remote, skipping texts already present.
    ///
    /// Persists only when something was appended.
    pub async fn merge_remote(&mut self, incoming: Vec<Quote>) -> Result<Vec<Quote>> {
        let before = self.store.len();
        let added = self.store.merge_remote(incoming);
        if !added.is_empty() {
            self.persist_or_rollback(before).await?;
            tracing::info!(added = added.len(), "Merged quotes from server");
        }
        Ok(added)
    }

    /// Pretty-printed JSON of the whole list.
    pub fn export_json(&self) -> Result<String> {
        Ok(self.store.to_export_json()?)
    }

    /// Write the export file and return how many quotes it holds.
    pub fn export_to(&self, path: &Path) -> Result<usize> {
        let json = self.export_json()?;
        export_to_file(&json, path)
            .with_context(|| format!("Failed to export quotes to {}", path.display()))?;
        Ok(self.store.len())
    }

    /// Pick a quote for display and record it as last viewed.
    ///
    /// Failing to record last-viewed is logged and otherwise ignored.
    pub async fn pick<R: Rng + ?Sized>(
        &self,
        filter: &CategoryFilter,
        rng: &mut R,
    ) -> Selection {
        let selection = pick_quote(self.store.quotes(), filter, rng);
        if let Selection::Quote(quote) = &selection {
            if let Err(e) = self.db.save_last_viewed(quote).await {
                tracing::warn!(error = %e, "Failed to record last viewed quote");
            }
        }
        selection
    }
}
