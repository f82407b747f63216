//! Review submission flow

mod service;

pub use service::ReviewService;
