//! Provider directory - loading, aggregation and filtering

pub mod filter;
mod service;

pub use service::DirectoryService;
