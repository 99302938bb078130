use rand::Rng;

use super::categories::CategoryFilter;
use super::types::Quote;

/// Outcome of picking a quote to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Quote(Quote),
    /// No quote matches the filter (or the store is empty).
    Empty,
}

impl Selection {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Quote(q) => Some(q),
            Self::Empty => None,
        }
    }
}

/// Pick a quote uniformly at random among those matching `filter`.
///
/// Never falls back to the unfiltered set: a filter with no matches yields
/// [`Selection::Empty`].
pub fn pick_quote<R: Rng + ?Sized>(
    quotes: &[Quote],
    filter: &CategoryFilter,
    rng: &mut R,
) -> Selection {
    let candidates: Vec<&Quote> = quotes.iter().filter(|q| filter.matches(q)).collect();
    if candidates.is_empty() {
        return Selection::Empty;
    }
    let idx = rng.gen_range(0..candidates.len());
    Selection::Quote(candidates[idx].clone())
}
