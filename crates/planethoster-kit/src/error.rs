//! Error types for planethoster-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error): Main error type, returned by every operation
//!   - [`ApiError`]: The API answered with a non-zero `error_code`
//!   - [`ValidationError`]: A payload was rejected locally, before any request
//!
//! Transport failures ([`Error::Http`]), undecodable bodies ([`Error::Decode`])
//! and API-level failures ([`Error::Api`], [`Error::ConnectionFailed`]) are kept
//! apart so callers can tell "the request never completed" from "the API said
//! no".
//!
//! # Example
//!
//! ```rust,no_run
//! use planethoster_kit::*;
//!
//! # async fn example() -> Result<(), Error> {
//! let reseller = Reseller::from_env()?;
//!
//! match reseller.check_availability("example", "com").await {
//!     Ok(result) => println!("available: {}", result.available),
//!     Err(Error::Api(err)) => println!("API refused: [{}] {}", err.code, err.message),
//!     Err(e) if e.is_transport() => println!("Network problem: {e}"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// A failure reported by the API through the response envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{code}] - {message}")]
pub struct ApiError {
    /// The envelope's `error_code`, never zero.
    pub code: i64,
    /// The envelope's `error` message.
    pub message: String,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A payload rejected before any request was built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid domain registration: a registrant contact is required")]
    MissingRegistrant,

    #[error("Invalid domain registration: the first nameserver must not be empty")]
    MissingNameserver,

    #[error("Nothing to do: no contact given")]
    NothingToDo,

    #[error("At least one nameserver is required")]
    NoNameservers,

    #[error("Too many nameservers: {0} given, at most 5 are supported")]
    TooManyNameservers(usize),
}

/// Main error type for planethoster-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Configuration ───
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ─── Request construction ───
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ─── Transport ───
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ─── Decoding ───
    #[error("Failed to decode response (HTTP {status}, {body_len} bytes): {source}; body: {snippet}")]
    Decode {
        status: u16,
        body_len: usize,
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    // ─── API ───
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Connection test failed: {0}")]
    ConnectionFailed(String),
}

/// Longest body prefix kept in [`Error::Decode`].
pub(crate) const SNIPPET_LEN: usize = 256;

impl Error {
    /// Build a decode error from the raw body.
    pub(crate) fn decode(status: u16, body: &[u8], source: serde_json::Error) -> Self {
        let text = String::from_utf8_lossy(body);
        let snippet: String = text.chars().take(SNIPPET_LEN).collect();
        Error::Decode {
            status,
            body_len: body.len(),
            snippet,
            source,
        }
    }

    /// Returns true if the request never produced a response (connect, TLS,
    /// timeout, ...).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Returns true if a response arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Returns true if the input was rejected locally.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// The API-level error, if that is what this is.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}
