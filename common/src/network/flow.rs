use std::collections::BTreeSet;

/// A datapath session entry: source and destination as printed by the
/// controller, plus the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    pub source: String,
    pub destination: String,
    pub raw_line: String,
}

impl FlowRecord {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, raw_line: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            raw_line: raw_line.into(),
        }
    }

    pub fn endpoints(&self) -> [&str; 2] {
        [&self.source, &self.destination]
    }
}

/// A flow annotated with the locality verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFlow {
    pub flow: FlowRecord,
    /// Both endpoints fall in subnets local to the controller.
    pub is_local: bool,
    /// Endpoints that are not addresses of the controller itself.
    /// Always empty for non-local flows.
    pub external_endpoints: BTreeSet<String>,
}
