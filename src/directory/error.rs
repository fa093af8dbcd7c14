//! Directory API-specific error types.

/// Errors that can occur during directory API operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Credentials or session token rejected by the API
    #[error("Not authorized by the directory API")]
    Unauthorized,

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// User record not found
    #[error("User not found: {id}")]
    UserNotFound { id: i64 },
}
