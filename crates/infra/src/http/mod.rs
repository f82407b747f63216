//! HTTP plumbing shared by the hosted-backend APIs

mod client;

pub use client::{HttpClient, HttpClientBuilder};
