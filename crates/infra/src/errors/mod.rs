//! Infrastructure error handling

mod conversions;

pub use conversions::{auth_error, table_error, InfraError};
