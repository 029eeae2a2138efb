use thiserror::Error;

/// Top-level error type for the `o2box-api` crate.
///
/// Covers every failure mode of a directory fetch: authentication,
/// transport, and scraping. The public boundary of
/// [`DeviceDirectory`](crate::DeviceDirectory) folds all of these into a single
/// failure signal; the variant only survives in the log.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The router rejected the password.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, timeout, non-2xx status, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Scraping ────────────────────────────────────────────────────
    /// A pseudo-array field carried a value that could not be parsed.
    #[error("Malformed value for field '{field}': {value:?}")]
    MalformedField { field: String, value: String },
}

impl Error {
    /// Returns `true` if the router rejected the credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if the router page no longer matches the expected format.
    pub fn is_format_change(&self) -> bool {
        matches!(self, Self::MalformedField { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
