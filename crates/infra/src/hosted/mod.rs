//! Hosted backend APIs
//!
//! The marketplace delegates auth, relational storage and object storage
//! to one hosted service exposing three HTTP surfaces:
//! `/auth/v1` (sessions), `/rest/v1` (tables) and `/storage/v1`
//! (objects). Each surface gets its own thin API type sharing one
//! [`HostedClient`].

mod auth;
mod client;
mod storage;
mod tables;

pub use auth::AuthApi;
pub use client::HostedClient;
pub use storage::StorageApi;
pub use tables::{SelectBuilder, TableApi};
