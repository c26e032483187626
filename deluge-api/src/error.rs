//! Error types for the Deluge web API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Deluge web API.
#[derive(Debug, Error)]
pub enum DelugeError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The daemon answered with a non-200 status or a body that is not a
    /// JSON-RPC response object.
    #[error("invalid response from deluge API (HTTP {status})")]
    InvalidResponse {
        /// HTTP status code of the offending response.
        status: u16,
    },

    /// The RPC response carried a non-null `error` object. The display text
    /// is the daemon's own message.
    #[error("{message}")]
    Rpc {
        /// Daemon-side error code.
        code: i64,
        /// Human-readable error message from the daemon.
        message: String,
    },

    /// `auth.login` completed without issuing a session cookie.
    #[error("invalid password")]
    InvalidPassword,

    /// File I/O error (reading a torrent file from disk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode a base64 torrent payload.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Failed to parse a JSON response from the API.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors (e.g. invalid base URL).
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for `Result<T, DelugeError>`.
pub type Result<T> = std::result::Result<T, DelugeError>;
