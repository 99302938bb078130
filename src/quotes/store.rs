use std::collections::HashSet;

use super::categories::categories_of;
use super::types::{seed_quotes, Quote, QuoteError, MAX_CATEGORY_LEN, MAX_TEXT_LEN};
use crate::util::strip_control_chars;

/// Ordered, append-only collection of quotes.
///
/// Insertion order is preserved and duplicates are allowed, except that
/// [`QuoteStore::merge_remote`] skips any quote whose text is already present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Store holding the built-in seed set.
    pub fn seeded() -> Self {
        Self::new(seed_quotes())
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Distinct categories with the "all" sentinel first.
    pub fn categories(&self) -> Vec<String> {
        categories_of(&self.quotes)
    }

    /// Validate and append a user-entered quote.
    ///
    /// Both fields are stripped of control characters and trimmed. On error
    /// the store is left unchanged.
    pub fn add(&mut self, text: &str, category: &str) -> Result<&Quote, QuoteError> {
        let quote = validate_input(text, category)?;
        self.quotes.push(quote);
        Ok(&self.quotes[self.quotes.len() - 1])
    }

    /// Append every record as-is. No de-duplication. Returns the count added.
    pub fn import_many(&mut self, records: Vec<Quote>) -> usize {
        let count = records.len();
        self.quotes.extend(records);
        count
    }

    /// Append incoming quotes whose text is not already in the store.
    ///
    /// Duplicates inside `incoming` are also collapsed. Returns the quotes
    /// that were actually appended, in order.
    pub fn merge_remote(&mut self, incoming: Vec<Quote>) -> Vec<Quote> {
        let mut known: HashSet<String> = self.quotes.iter().map(|q| q.text.clone()).collect();
        let mut added = Vec::new();
        for quote in incoming {
            if known.insert(quote.text.clone()) {
                added.push(quote);
            }
        }
        self.quotes.extend(added.iter().cloned());
        added
    }

    /// Drop everything past `len`. Used to undo an append whose write-through failed.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.quotes.truncate(len);
    }

    /// Pretty-printed JSON array of every quote, as written to `quotes.json`.
    pub fn to_export_json(&self) -> Result<String, QuoteError> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    /// Compact JSON used for the durable `quotes` slot.
    pub fn to_storage_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.quotes)
    }
}

/// Parse an import payload: a JSON array of quote records.
///
/// Accepts both the object form and legacy bare strings. Any other shape is
/// reported as [`QuoteError::Import`].
pub fn parse_import(content: &str) -> Result<Vec<Quote>, QuoteError> {
    let records: Vec<Quote> = serde_json::from_str(content)?;
    Ok(records)
}

/// Sanitize and validate user input for a new quote.
pub fn validate_input(text: &str, category: &str) -> Result<Quote, QuoteError> {
    let text = strip_control_chars(text);
    let text = text.trim();
    let category = strip_control_chars(category);
    let category = category.trim();

    if text.is_empty() {
        return Err(QuoteError::EmptyText);
    }
    if category.is_empty() {
        return Err(QuoteError::EmptyCategory);
    }

    let text_len = text.chars().count();
    if text_len > MAX_TEXT_LEN {
        return Err(QuoteError::TextTooLong(text_len));
    }
    let category_len = category.chars().count();
    if category_len > MAX_CATEGORY_LEN {
        return Err(QuoteError::CategoryTooLong(category_len));
    }

    Ok(Quote::new(text, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_add_appends_trimmed_quote() {
        let mut store = QuoteStore::default();
        let added = store.add("  Stay hungry  ", " Life ").unwrap().clone();
        assert_eq!(added, Quote::new("Stay hungry", "Life"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let mut store = QuoteStore::seeded();
        let err = store.add("   ", "Life").unwrap_err();
        assert!(matches!(err, QuoteError::EmptyText));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_add_rejects_blank_category() {
        let mut store = QuoteStore::seeded();
        let err = store.add("Something", "\t\n").unwrap_err();
        assert!(matches!(err, QuoteError::EmptyCategory));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_add_strips_escape_sequences() {
        let mut store = QuoteStore::default();
        let added = store.add("\x1b[31mRed\x1b[0m alert", "Warn\x07").unwrap();
        assert_eq!(added.text, "Red alert");
        assert_eq!(added.category, "Warn");
    }

    #[test]
    fn test_add_rejects_overlong_category() {
        let mut store = QuoteStore::default();
        let long = "x".repeat(MAX_CATEGORY_LEN + 1);
        assert!(matches!(
            store.add("ok", &long),
            Err(QuoteError::CategoryTooLong(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_keeps_duplicates() {
        let mut store = QuoteStore::new(vec![Quote::new("a", "x")]);
        let count = store.import_many(vec![Quote::new("a", "x"), Quote::new("b", "y")]);
        assert_eq!(count, 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_merge_skips_existing_text() {
        let mut store = QuoteStore::new(vec![Quote::new("Do it now", "Motivation")]);
        let added = store.merge_remote(vec![Quote::new("Do it now", "Server")]);
        assert!(added.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_merge_appends_new_text() {
        let mut store = QuoteStore::new(vec![Quote::new("Do it now", "Motivation")]);
        let added = store.merge_remote(vec![Quote::new("New idea", "Server")]);
        assert_eq!(added, vec![Quote::new("New idea", "Server")]);
        assert_eq!(store.quotes()[1], Quote::new("New idea", "Server"));
    }

    #[test]
    fn test_merge_collapses_duplicates_within_batch() {
        let mut store = QuoteStore::default();
        let added = store.merge_remote(vec![Quote::new("x", "Server"), Quote::new("x", "Server")]);
        assert_eq!(added.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_export_then_import_reproduces_store() {
        let store = QuoteStore::seeded();
        let json = store.to_export_json().unwrap();
        assert!(json.contains("\n  {"), "export should be pretty-printed");

        let mut restored = QuoteStore::default();
        restored.import_many(parse_import(&json).unwrap());
        assert_eq!(restored, store);
    }

    #[test]
    fn test_parse_import_rejects_garbage() {
        assert!(matches!(parse_import("not json"), Err(QuoteError::Import(_))));
        assert!(matches!(
            parse_import(r#"{"text":"a","category":"b"}"#),
            Err(QuoteError::Import(_))
        ));
        assert!(matches!(parse_import("[1, 2]"), Err(QuoteError::Import(_))));
    }

    #[test]
    fn test_parse_import_empty_array() {
        assert!(parse_import("[]").unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_add_grows_by_one_and_round_trips(
            text in "[a-zA-Z0-9][a-zA-Z0-9 .,!?]{0,40}",
            category in "[a-zA-Z][a-zA-Z0-9]{0,15}",
        ) {
            let mut store = QuoteStore::seeded();
            let before = store.len();
            store.add(&text, &category).unwrap();
            prop_assert_eq!(store.len(), before + 1);

            let json = store.to_storage_json().unwrap();
            let reloaded: Vec<Quote> = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(reloaded.last().unwrap(), &Quote::new(text.trim(), category.trim()));
        }

        #[test]
        fn prop_whitespace_input_rejected(
            blank in "[ \t\n]{0,8}",
            other in "[a-z]{1,8}",
        ) {
            let mut store = QuoteStore::seeded();
            prop_assert!(store.add(&blank, &other).is_err());
            prop_assert!(store.add(&other, &blank).is_err());
            prop_assert_eq!(store.len(), 4);
        }

        #[test]
        fn prop_merge_never_duplicates_text(
            texts in proptest::collection::vec("[a-d]{1,2}", 0..20),
        ) {
            let mut store = QuoteStore::new(vec![Quote::new("a", "Seed")]);
            store.merge_remote(texts.into_iter().map(|t| Quote::new(t, "Server")).collect());
            let unique: HashSet<&str> = store.quotes().iter().map(|q| q.text.as_str()).collect();
            prop_assert_eq!(unique.len(), store.len());
        }
    }
}
