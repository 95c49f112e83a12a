use thiserror::Error;

/// Errors raised while scraping a DD-WRT router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The HTTP fetch failed (connection, timeout, rejected credentials).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-empty status page contained no brace-delimited records.
    #[error("Malformed response from {page}: no records found")]
    MalformedResponse { page: String },

    /// A field lookup was attempted before `init()` completed.
    #[error("Session not ready; call init() first")]
    NotReady,

    /// A table field did not split into whole records.
    #[error("Field '{field}' has {tokens} tokens, not a multiple of {window}")]
    Alignment {
        field: &'static str,
        tokens: usize,
        window: usize,
    },

    /// A record slot could not be decoded.
    #[error("Invalid record in '{field}': {reason}")]
    InvalidRecord { field: &'static str, reason: String },

    /// The requested field has not been reported by the router.
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// The router address is unset or still the placeholder.
    #[error("Router address is unset (got '{0}')")]
    AddressUnset(String),
}

impl Error {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether this error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport("timeout".to_string())
        } else if let Some(status) = err.status() {
            Self::Transport(format!("HTTP {}", status))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result type alias using the scraper's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
