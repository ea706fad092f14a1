//! API call errors and the failure taxonomy.
//!
//! Every failed platform call is classified into one [`ApiErrorKind`]
//! derived from the HTTP status code or the transport error. The mapping
//! is a pure function: the same status always yields the same kind.

use thiserror::Error;

/// Classified failure kinds for platform API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 401 — missing or invalid API key for the required scope.
    Unauthorized,
    /// 403 — the key is valid but not allowed to perform the operation.
    Forbidden,
    /// 404 — the addressed resource does not exist.
    NotFound,
    /// 422 — the platform rejected the request payload.
    Validation,
    /// 409 — the operation conflicts with existing state.
    Conflict,
    /// Connection-level failure: the request never completed.
    Transport,
    /// Anything else, including unexpected statuses and decode failures.
    Unknown,
}

impl ApiErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::Validation,
            _ => Self::Unknown,
        }
    }

    /// Short lowercase label for logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Transport => "transport",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error raised by one platform API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The platform answered with a non-2xx status.
    #[error("HTTP {status} from {endpoint}: {body}")]
    Status {
        status: u16,
        endpoint: String,
        body: String,
    },

    /// The request never completed (connect failure, timeout).
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded into the expected record.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Classify this error into the failure taxonomy.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Status { status, .. } => ApiErrorKind::from_status(*status),
            // Only connection-level failures count as transport; anything
            // else that surfaced during the request is unclassified.
            Self::Transport { source, .. } => {
                if source.is_connect() || source.is_timeout() {
                    ApiErrorKind::Transport
                } else {
                    ApiErrorKind::Unknown
                }
            }
            Self::Decode { .. } => ApiErrorKind::Unknown,
        }
    }

    /// The HTTP status code, when the platform answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response body, when the platform answered at all.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}
