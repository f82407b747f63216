//! Directory and detail view types
//!
//! The directory is a denormalized, in-memory join of providers, their
//! user rows and review aggregates. It is recomputed on every load and
//! handed out as an immutable snapshot rather than mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::provider::{PortfolioImage, Provider};
use super::review::Review;

/// One provider as shown in the browsing directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub provider: Provider,
    /// Resolved user display name, or the "Provider" fallback.
    pub display_name: String,
    /// Mean review rating rounded to one decimal; 0.0 when unreviewed.
    pub avg_rating: f64,
    pub review_count: usize,
}

/// Immutable result of one directory load.
///
/// Each reload produces a fresh snapshot; callers filter and render from
/// the snapshot they hold, so a concurrent reload can never show them a
/// half-updated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub entries: Vec<DirectoryEntry>,
    pub loaded_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    /// Snapshot for the explicit "no providers yet" state.
    pub const fn empty(loaded_at: DateTime<Utc>) -> Self {
        Self { entries: Vec::new(), loaded_at }
    }

    /// True when no providers exist at all (distinct from a filter
    /// matching nothing).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A review joined to its author's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author_name: String,
}

/// Expanded single-provider view: profile, portfolio and reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailView {
    pub provider: Provider,
    pub display_name: String,
    pub portfolio: Vec<PortfolioImage>,
    /// Reviews ordered newest first.
    pub reviews: Vec<ReviewWithAuthor>,
    pub avg_rating: f64,
    pub review_count: usize,
    /// Whether the current viewer may submit a review (signed in and not
    /// looking at their own profile).
    pub can_review: bool,
}
