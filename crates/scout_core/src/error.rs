use std::fmt;

/// Why a remote request failed.
///
/// `Network`, `RateLimited` and `InvalidResponse` cover searches, `NotFound`
/// and `Network` cover details. `HttpStatus` carries any other non-success
/// status so the presentation layer can tell a server outage (5xx, worth a
/// retry) from a rejected request (4xx, not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    RateLimited,
    InvalidResponse,
    NotFound,
    HttpStatus(u16),
}

impl FailureKind {
    /// Whether a user-initiated retry of the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FailureKind::Network | FailureKind::RateLimited | FailureKind::InvalidResponse => true,
            FailureKind::NotFound => false,
            FailureKind::HttpStatus(code) => *code >= 500,
        }
    }

    /// Explanatory text for the presentation layer.
    ///
    /// Malformed payloads are reported the same way as network failures.
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::Network | FailureKind::InvalidResponse | FailureKind::HttpStatus(_) => {
                "Failed to fetch jobs. Please try again later."
            }
            FailureKind::RateLimited => {
                "The job search service is receiving too many requests. Wait a moment and try again."
            }
            FailureKind::NotFound => "That listing is no longer available.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::RateLimited => write!(f, "rate limited"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
        }
    }
}

/// A typed failure from the remote search boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SearchError {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
