//! Provider profile editing

mod service;

pub use service::ProfileService;
