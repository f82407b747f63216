//! Hosted-backend implementations of the core store ports
//!
//! Each adapter maps one port trait onto a table of the hosted backend
//! through [`crate::hosted::TableApi`].

mod portfolio;
mod providers;
mod reviews;
mod users;

pub use portfolio::PortfolioTable;
pub use providers::ProviderTable;
pub use reviews::ReviewTable;
pub use users::UserTable;
