//! Classified fetch errors.
//!
//! # The Error Boundary Rule
//!
//! > No error ever crosses from the controller into the presentation layer
//! > as a propagating error.
//!
//! Resources return [`FetchError`] (already classified); the controller
//! converts every failure into a notification plus state flags. The
//! presentation layer only ever sees [`ErrorKind`].

use std::borrow::Cow;

use thiserror::Error;

/// A classified backend fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The backend rejected the caller's credentials (HTTP 401).
    ///
    /// Surfacing this schedules a redirect to the landing screen.
    #[error("unauthorized (status 401)")]
    Unauthorized,

    /// Transport or backend failure with no auth significance.
    #[error("backend request failed{}: {message}", status_suffix(.status))]
    Network {
        /// HTTP status, if a response was received at all.
        status: Option<u16>,
        message: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(s) => format!(" (status {s})"),
        None => String::new(),
    }
}

impl FetchError {
    /// Classify a failure by its HTTP status. `401` becomes
    /// [`FetchError::Unauthorized`]; everything else is a network error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 401 {
            FetchError::Unauthorized
        } else {
            FetchError::Network {
                status: Some(status),
                message: message.into(),
            }
        }
    }

    /// A transport failure that never produced a response.
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Network {
            status: None,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Unauthorized => ErrorKind::Auth,
            FetchError::Network { .. } => ErrorKind::Network,
        }
    }

    /// A user-safe message for the notification channel. Internal detail
    /// (status codes, backend messages) stays in the logs.
    pub fn user_message(&self, resource_label: &str) -> Cow<'static, str> {
        match self {
            FetchError::Unauthorized => "Your session has expired. Please sign in again.".into(),
            FetchError::Network { .. } => {
                format!("Failed to load {resource_label}. Please try again.").into()
            }
        }
    }
}

/// The error flag exposed on [`crate::ListingState`].
///
/// An empty record set is NOT an error: it is a successfully settled state
/// and never produces an `ErrorKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Generic "failed to load, try again" failure.
    Network,
    /// HTTP 401; triggers the scheduled landing redirect.
    Auth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_classifies_as_auth() {
        let err = FetchError::from_status(401, "token expired");
        assert!(matches!(err, FetchError::Unauthorized));
        assert_eq!(err.kind(), ErrorKind::Auth);
    }

    #[test]
    fn non_auth_statuses_classify_as_network() {
        for status in [400, 403, 404, 500, 503] {
            let err = FetchError::from_status(status, "boom");
            assert_eq!(err.kind(), ErrorKind::Network, "status {status}");
        }
    }

    #[test]
    fn transport_failure_has_no_status() {
        let err = FetchError::transport("connection refused");
        match err {
            FetchError::Network { status, .. } => assert_eq!(status, None),
            _ => panic!("expected Network"),
        }
    }

    #[test]
    fn display_includes_status_when_present() {
        let err = FetchError::from_status(503, "unavailable");
        let msg = err.to_string();
        assert!(msg.contains("503"), "{msg}");
        assert!(msg.contains("unavailable"), "{msg}");

        let err = FetchError::transport("refused");
        assert!(!err.to_string().contains("status"), "{err}");
    }

    #[test]
    fn user_message_hides_internal_detail() {
        let err = FetchError::from_status(500, "pg: relation bookings does not exist");
        let msg = err.user_message("bookings");
        assert!(!msg.contains("pg:"));
        assert!(msg.contains("bookings"));
        assert!(msg.contains("try again"));
    }
}
