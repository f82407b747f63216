//! Client-side directory filtering
//!
//! Pure predicate filtering over a loaded snapshot: no I/O, stable
//! order, all active predicates combined with AND.

use craftlink_domain::DirectoryEntry;
use once_cell::sync::Lazy;
use regex::Regex;

/// First `$<integer>` token in a free-text price range.
static PRICE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\d+)").expect("price token pattern is valid"));

/// Coarse price tier derived from the leading dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBucket {
    /// Under $30.
    Low,
    /// $30 to $60 inclusive.
    Medium,
    /// Over $60.
    High,
}

impl PriceBucket {
    /// Whether a free-text price range falls into this bucket.
    ///
    /// A price range without a `$<digits>` token matches no bucket at
    /// all; "Negotiable" never satisfies a price filter.
    pub fn matches(self, price_range: &str) -> bool {
        let Some(amount) = leading_amount(price_range) else {
            return false;
        };

        match self {
            Self::Low => amount < 30,
            Self::Medium => (30..=60).contains(&amount),
            Self::High => amount > 60,
        }
    }
}

/// Extract the first dollar amount from a price range, if any.
fn leading_amount(price_range: &str) -> Option<u32> {
    PRICE_TOKEN
        .captures(price_range)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Active directory filters. `Default` means "no filtering".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring over display name, skills or bio.
    pub search_text: Option<String>,
    /// Case-insensitive substring over skills.
    pub category: Option<String>,
    /// Minimum average rating; unreviewed entries (0.0) only pass when
    /// the threshold is absent or zero.
    pub min_rating: Option<f64>,
    /// Price tier filter.
    pub price_bucket: Option<PriceBucket>,
}

impl FilterCriteria {
    fn matches(&self, entry: &DirectoryEntry) -> bool {
        self.matches_search(entry)
            && self.matches_category(entry)
            && self.matches_rating(entry)
            && self.matches_price(entry)
    }

    fn matches_search(&self, entry: &DirectoryEntry) -> bool {
        match active(&self.search_text) {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                entry.display_name.to_lowercase().contains(&needle)
                    || entry.provider.skills.to_lowercase().contains(&needle)
                    || entry.provider.bio.to_lowercase().contains(&needle)
            }
        }
    }

    fn matches_category(&self, entry: &DirectoryEntry) -> bool {
        match active(&self.category) {
            None => true,
            Some(category) => {
                entry.provider.skills.to_lowercase().contains(&category.to_lowercase())
            }
        }
    }

    fn matches_rating(&self, entry: &DirectoryEntry) -> bool {
        self.min_rating.is_none_or(|threshold| entry.avg_rating >= threshold)
    }

    fn matches_price(&self, entry: &DirectoryEntry) -> bool {
        self.price_bucket.is_none_or(|bucket| bucket.matches(&entry.provider.price_range))
    }
}

/// An empty search box is "no filter", not "match empty string".
fn active(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}

/// Apply `criteria` to `entries`, preserving input order.
pub fn filter(entries: &[DirectoryEntry], criteria: &FilterCriteria) -> Vec<DirectoryEntry> {
    entries.iter().filter(|entry| criteria.matches(entry)).cloned().collect()
}
