//! # Craftlink Domain
//!
//! Business domain types and models for the Craftlink marketplace client.
//!
//! This crate contains:
//! - Domain data types (User, Provider, Review, DirectorySnapshot, etc.)
//! - Domain error types and Result definitions
//! - Domain constants
//! - Small pure utilities (rating aggregation, contact link normalization)
//!
//! ## Architecture
//! - No dependencies on other Craftlink crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use constants::*;
pub use errors::*;
pub use types::*;
