use thiserror::Error;

/// Failure modes of a catalog request.
///
/// The `Display` output is the human-readable message surfaced by the view
/// models, so each variant renders a fixed prefix followed by its cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid URL: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Invalid response from the server (status {0})")]
    BadStatus(u16),
    #[error("Failed to decode data: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Message shown to the user when this error ends a load.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            CatalogError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CatalogError::BadStatus(status.as_u16())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidRequest(err.to_string())
    }
}
