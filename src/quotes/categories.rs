use std::collections::HashSet;

use super::types::Quote;

/// Sentinel filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Distinct categories across `quotes` in first-seen order, prefixed by the
/// [`ALL_CATEGORIES`] sentinel.
///
/// Labels are listed verbatim, including imported ones with padding or no
/// text at all. A quote whose category is literally `"all"` is folded into
/// the sentinel entry, so it cannot be filtered on its own:
///
/// ```
/// use quotebook::quotes::{categories_of, Quote};
///
/// let quotes = [Quote::new("a", "all"), Quote::new("b", " Life ")];
/// assert_eq!(categories_of(&quotes), vec!["all", " Life "]);
/// ```
pub fn categories_of(quotes: &[Quote]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(quotes.len());
    seen.insert(ALL_CATEGORIES);

    let mut out = Vec::with_capacity(quotes.len().min(16) + 1);
    out.push(ALL_CATEGORIES.to_string());
    for quote in quotes {
        if seen.insert(quote.category.as_str()) {
            out.push(quote.category.clone());
        }
    }
    out
}

/// The active category filter.
///
/// Persisted as a plain string: `"all"` or the category label. A restored
/// filter may name a category that no longer exists; it then simply matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Filter for a Category Index entry or persisted value. The label is
    /// taken verbatim so it matches the quotes it was listed from.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(c) => c,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => quote.category == *c,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn q(text: &str, category: &str) -> Quote {
        Quote::new(text, category)
    }

    #[test]
    fn test_categories_first_seen_order() {
        let quotes = vec![q("a", "Life"), q("b", "Motivation"), q("c", "Life")];
        assert_eq!(categories_of(&quotes), vec!["all", "Life", "Motivation"]);
    }

    #[test]
    fn test_categories_empty_store_only_sentinel() {
        assert_eq!(categories_of(&[]), vec!["all"]);
    }

    #[test]
    fn test_categories_literal_all_not_duplicated() {
        let quotes = vec![q("a", "all"), q("b", "Life")];
        assert_eq!(categories_of(&quotes), vec!["all", "Life"]);
    }

    #[test]
    fn test_categories_case_sensitive() {
        let quotes = vec![q("a", "life"), q("b", "Life")];
        assert_eq!(categories_of(&quotes), vec!["all", "life", "Life"]);
    }

    #[test]
    fn test_filter_from_label() {
        assert_eq!(CategoryFilter::from_label("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_label("Life"),
            CategoryFilter::Category("Life".into())
        );
    }

    #[test]
    fn test_filter_from_label_keeps_odd_labels() {
        let padded = CategoryFilter::from_label(" Life ");
        assert_eq!(padded, CategoryFilter::Category(" Life ".into()));
        assert!(padded.matches(&q("a", " Life ")));
        assert!(!padded.matches(&q("b", "Life")));

        let blank = CategoryFilter::from_label("");
        assert_eq!(blank, CategoryFilter::Category(String::new()));
        assert!(blank.matches(&q("c", "")));
        assert!(!blank.matches(&q("d", "Work")));
    }

    #[test]
    fn test_filter_round_trips_through_as_str() {
        let filter = CategoryFilter::Category("Server".into());
        assert_eq!(CategoryFilter::from_label(filter.as_str()), filter);
        assert_eq!(CategoryFilter::All.to_string(), "all");
    }

    #[test]
    fn test_filter_matches() {
        let life = q("a", "Life");
        assert!(CategoryFilter::All.matches(&life));
        assert!(CategoryFilter::Category("Life".into()).matches(&life));
        assert!(!CategoryFilter::Category("Work".into()).matches(&life));
    }
}
