//! Conversions from external infrastructure errors into domain errors.

use craftlink_domain::CraftlinkError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;
use url::ParseError as UrlError;

/// Postgres unique-constraint violation, as reported by the table store.
const CODE_UNIQUE_VIOLATION: &str = "23505";

/// Table-store code for "expected exactly one row, found none".
const CODE_SINGLE_ROW_NOT_FOUND: &str = "PGRST116";

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CraftlinkError);

impl From<InfraError> for CraftlinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CraftlinkError> for InfraError {
    fn from(value: CraftlinkError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let message = if value.is_timeout() {
            format!("http request timed out: {value}")
        } else if value.is_connect() {
            format!("connection failed: {value}")
        } else {
            format!("http error: {value}")
        };

        if value.is_decode() {
            InfraError(CraftlinkError::Internal(format!("failed to decode response: {value}")))
        } else {
            InfraError(CraftlinkError::Network(message))
        }
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(CraftlinkError::Config(format!("invalid base URL: {value}")))
    }
}

/// Map a table-store error payload to a domain error.
///
/// The store reports machine-readable codes alongside HTTP status:
/// unique violations become `Duplicate`, a missed single-row expectation
/// becomes `NotFound`, auth failures become `Auth`, everything else is a
/// generic `Storage` error.
pub fn table_error(status: StatusCode, code: Option<&str>, message: &str) -> CraftlinkError {
    match code {
        Some(CODE_UNIQUE_VIOLATION) => CraftlinkError::Duplicate(message.to_string()),
        Some(CODE_SINGLE_ROW_NOT_FOUND) => CraftlinkError::NotFound(message.to_string()),
        _ if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => {
            CraftlinkError::Auth(format!("table access denied (HTTP {status}): {message}"))
        }
        _ if status == StatusCode::CONFLICT => CraftlinkError::Duplicate(message.to_string()),
        _ => CraftlinkError::Storage(format!("table store error (HTTP {status}): {message}")),
    }
}

/// Map an auth-service error payload to a domain error.
pub fn auth_error(status: StatusCode, message: &str) -> CraftlinkError {
    if status.is_server_error() {
        CraftlinkError::Network(format!("auth service error (HTTP {status}): {message}"))
    } else {
        CraftlinkError::Auth(format!("auth failed (HTTP {status}): {message}"))
    }
}
