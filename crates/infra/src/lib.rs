//! # Craftlink Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The retrying HTTP client
//! - The hosted-backend APIs (auth, table store, object storage)
//! - Adapters implementing the core port traits over those APIs
//! - Configuration loading and error conversions
//!
//! ## Architecture
//! - Implements traits defined in `craftlink-core`
//! - Depends on `craftlink-domain` and `craftlink-core`
//! - Contains all "impure" code (network I/O)

pub mod adapters;
pub mod config;
pub mod errors;
pub mod hosted;
pub mod http;

// Re-export commonly used items
pub use adapters::{PortfolioTable, ProviderTable, ReviewTable, UserTable};
pub use config::HostedConfig;
pub use hosted::{AuthApi, HostedClient, StorageApi, TableApi};
pub use http::HttpClient;
