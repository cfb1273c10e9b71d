//! Catalog loading error types.

/// Errors that can occur when loading or reading the attraction catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request to the content store failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check CATALOG_API_KEY")]
    Unauthorized,

    /// Content store returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse catalog JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A paginated listing could not be followed to its end
    #[error("pagination error: {message}")]
    Pagination { message: String },

    /// Failed to read a local catalog file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },

    /// No catalog snapshot has been loaded yet
    #[error("attraction catalog is unavailable, try again shortly")]
    Unavailable,
}
