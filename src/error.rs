//! Error type shared by the client, transport, and config layers.

use crate::types::Exception;

/// Errors produced by IP messaging client operations.
#[derive(Debug, thiserror::Error)]
pub enum IpMsgError {
    /// A required credential environment variable is not set.
    #[error("missing credential: env var {var} not set")]
    MissingCredential { var: String },

    /// A channel type string was neither `public` nor `private`.
    #[error("unknown channel type: {0} (expected 'public' or 'private')")]
    InvalidChannelType(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request failed before a complete response was read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The provider returned a non-2xx status.
    ///
    /// `exception` holds the decoded error body, or the default value when the
    /// body could not be decoded. `body` is always the raw response text.
    #[error("API error: status {status}: {}", .exception.message)]
    Api { status: u16, exception: Exception, body: String },

    /// A channel delete returned anything other than 204.
    #[error("failed deleting channel (status {status})")]
    DeleteFailed { status: u16 },

    /// A 2xx response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// Local JSON rendering failed.
    #[error("JSON encode failed: {0}")]
    Encode(String),
}

impl IpMsgError {
    /// HTTP status behind the error, when the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::DeleteFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// Decoded provider error payload, if this is an API error.
    #[must_use]
    pub fn exception(&self) -> Option<&Exception> {
        match self {
            Self::Api { exception, .. } => Some(exception),
            _ => None,
        }
    }
}
