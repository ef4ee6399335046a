use mmcollect_common::error::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("{method} {url} returned status {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    #[error("login to {controller} failed (user {username})")]
    Login { controller: String, username: String },

    #[error("controller rejected the request: {0}")]
    Rejected(String),

    #[error("unexpected response: {0}")]
    Response(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    /// The URL is dropped: its query string may carry the session token.
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e.without_url())
    }
}

impl From<ApiError> for RemoteError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Http(e) => RemoteError::Transport(e.to_string()),
            ApiError::Status { method, url, status } => RemoteError::Status {
                method,
                endpoint: url,
                status,
            },
            ApiError::Rejected(msg) => RemoteError::Rejected(msg),
            other => RemoteError::Response(other.to_string()),
        }
    }
}
