//! Errors raised by the library crates.

use thiserror::Error;

/// A session line carried the flow marker but not the two address tokens
/// every flow entry starts with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: expected source and destination, found {found} token(s): {line:?}")]
pub struct FlowParseError {
    /// 1-based position of the line within its table.
    pub line_number: usize,
    pub found: usize,
    pub line: String,
}

/// Failure of a single remote command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{method} {endpoint} returned status {status}")]
    Status {
        method: String,
        endpoint: String,
        status: u16,
    },

    #[error("controller rejected the command: {0}")]
    Rejected(String),

    #[error("unexpected response: {0}")]
    Response(String),
}

/// Collected command output that cannot be turned into a line table.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("expected a list of lines or an object wrapping one under `{field}`, got {found}")]
    UnexpectedShape { field: &'static str, found: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
