//! User identity types
//!
//! User rows live in the hosted table store and are created at signup;
//! everything else treats them as read-only.

use serde::{Deserialize, Serialize};

/// Account role, stored alongside the user row and in auth metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses the directory and leaves reviews.
    Client,
    /// Offers services and owns a provider profile.
    Provider,
}

impl Role {
    /// Parse a role string leniently; anything unrecognised is a client.
    ///
    /// Mirrors the role fallback applied when the users-table lookup fails
    /// or carries an unexpected value.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "provider" => Self::Provider,
            _ => Self::Client,
        }
    }

    /// Stable lowercase name as stored in the users table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Provider => "provider",
        }
    }
}

/// User identity record from the hosted users table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
