//! Station directory error types.

/// Errors that can occur when reading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check CENTRAL_SERVER_TOKEN")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered with `success: false`
    #[error("{message}")]
    Rejected { message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Local station file could not be read
    #[error("station file error: {message}")]
    File { message: String },
}

impl DirectoryError {
    /// Whether the directory could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, DirectoryError::Http(_))
    }
}
