//! Error types for parts-finder

use std::fmt;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the API client, the submission pipeline and configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Network-layer failure (DNS, timeout, connection refused, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status or `success: false`
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response, if any
        message: String,
    },

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid API base URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A submission is already in flight (or awaiting navigation)
    #[error("an inquiry is already being submitted")]
    SubmissionInFlight,

    /// Selection operation rejected by the resolver
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Catalog collection could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status associated with this error, when there is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Catalog collection names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Vehicle manufacturers (makes)
    Manufacturers,
    /// Models of the selected manufacturer
    Models,
    /// Part categories
    PartCategories,
}

impl Collection {
    /// Name used in events and error messages
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manufacturers => "manufacturers",
            Self::Models => "models",
            Self::PartCategories => "part_categories",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of catalog failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// Transport failure, non-2xx or `success: false`
    FetchFailed,
}

/// A catalog collection failed to load
///
/// Scoped to one dropdown; the rest of the search stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {collection}: {message}")]
pub struct CatalogError {
    /// What went wrong
    pub kind: CatalogErrorKind,
    /// Which collection
    pub collection: Collection,
    /// Underlying cause, for logs
    pub message: String,
}

impl CatalogError {
    /// Build a `fetch_failed` error for a collection
    pub fn fetch_failed(collection: Collection, cause: &Error) -> Self {
        Self {
            kind: CatalogErrorKind::FetchFailed,
            collection,
            message: cause.to_string(),
        }
    }
}

/// Rejected selection operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// The operation is not legal in the current selection state
    #[error("invalid selection state: {0}")]
    InvalidState(String),

    /// No loaded manufacturer matches the requested name
    #[error("unknown manufacturer: {0}")]
    UnknownManufacturer(String),
}
