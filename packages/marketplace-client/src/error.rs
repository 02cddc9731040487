//! Client error type and classification into [`listing_core::FetchError`].

use listing_core::FetchError;
use thiserror::Error;

/// Errors returned by [`crate::MarketplaceClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, TLS, connect, body decode).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err.status() {
            Some(status) => FetchError::from_status(status, err.to_string()),
            None => FetchError::transport(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::ErrorKind;

    #[test]
    fn status_401_becomes_unauthorized() {
        let err = ApiError::Api {
            status: 401,
            message: "token expired".into(),
        };
        let fetch: FetchError = err.into();
        assert_eq!(fetch.kind(), ErrorKind::Auth);
    }

    #[test]
    fn other_statuses_become_network_errors() {
        for status in [400, 404, 500, 503] {
            let err = ApiError::Api {
                status,
                message: "boom".into(),
            };
            let fetch: FetchError = err.into();
            assert_eq!(fetch.kind(), ErrorKind::Network, "status {status}");
        }
    }
}
