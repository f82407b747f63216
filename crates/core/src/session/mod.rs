//! Session access and account lifecycle

pub mod ports;
mod service;

pub use service::SessionService;
