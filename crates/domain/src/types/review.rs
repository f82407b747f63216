//! Review types
//!
//! Reviews are written once by a client and never updated or deleted.
//! The table store enforces at most one review per (provider, client)
//! pair with a composite unique key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored review row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub provider_id: String,
    pub client_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new review. `created_at` is assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub provider_id: String,
    pub client_id: String,
    pub rating: u8,
    pub comment: String,
}
