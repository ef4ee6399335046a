use std::fmt;

/// What became of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The controller accepted the command. Holds the response body.
    Success(String),
    /// The call failed. Holds the error message.
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Result of one corrective action against one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationResult {
    pub address: String,
    pub action: String,
    pub outcome: Outcome,
}

impl RemediationResult {
    pub fn new(address: impl Into<String>, action: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            address: address.into(),
            action: action.into(),
            outcome,
        }
    }
}

/// Renders the status line that ends up in the report.
impl fmt::Display for RemediationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Success(body) => {
                write!(f, "SENT {} FOR {}: {}", self.action, self.address, body)
            }
            Outcome::Failure(message) => {
                write!(f, "FAILED {} FOR {}: {}", self.action, self.address, message)
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
