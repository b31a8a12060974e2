use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Collection not allowed: {0}")]
    CollectionNotAllowed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}) on {path}")]
    Server { status: u16, path: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Api error: {0}")]
    Api(String),
}

impl DashError {
    /// True for the "endpoint absent" class that permits the one-shot
    /// `/api` prefix retry. Server, network, and decode failures never do.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DashError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
