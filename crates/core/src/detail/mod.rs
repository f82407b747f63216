//! Single-provider detail view

mod service;

pub use service::DetailService;
