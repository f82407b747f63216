//! # Craftlink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) over the hosted backend
//! - The directory loader, filter engine and detail composer
//! - The review submission and profile save flows
//!
//! ## Architecture Principles
//! - Only depends on `craftlink-domain`
//! - No HTTP or storage code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod detail;
pub mod directory;
pub mod profile;
pub mod review;
pub mod session;

// Infrastructure ports
pub mod store_ports;

// Re-export specific items to avoid ambiguity
pub use detail::DetailService;
pub use directory::filter::{filter, FilterCriteria, PriceBucket};
pub use directory::DirectoryService;
pub use profile::ProfileService;
pub use review::ReviewService;
pub use session::ports::{AuthGateway, AuthUser, NewAccount, Session};
pub use session::SessionService;
pub use store_ports::{ObjectStore, PortfolioStore, ProviderStore, ReviewStore, UserStore};
